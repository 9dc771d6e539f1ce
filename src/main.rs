mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod util;
use crate::app::{App, TerminalInput};
use crate::config::Config;
use crate::game::Game;
use crate::highscore::HighScoreStore;
use anyhow::Context;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let (config, fallback) =
        Config::load_or_default(Config::default_path()).context("failed to load configuration")?;
    config.init_logging()?;
    if let Some(e) = fallback {
        log::warn!("{:#}; using default configuration", anyhow::Error::new(e));
    }
    let store = HighScoreStore::new(config.files.high_score_file.clone());
    let high_score = store.load();
    log::info!("Starting game; high score {high_score} from {}", store.path().display());
    let app = App::new(Game::new(high_score), store, TerminalInput, consts::TICK_PERIOD);
    let mut terminal = ratatui::try_init().context("failed to set up terminal")?;
    let r = app.run(&mut terminal);
    ratatui::restore();
    let score = r?;
    log::info!("Game over; final score: {score}");
    Ok(())
}
