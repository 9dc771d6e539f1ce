use crate::game::Game;
use crate::highscore::HighScoreStore;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// A source of input events
pub(crate) trait Input {
    /// Return all events received since the last call, oldest first, without
    /// blocking
    fn pending(&mut self) -> io::Result<Vec<Event>>;
}

/// Reads events from the terminal via crossterm
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalInput;

impl Input for TerminalInput {
    fn pending(&mut self) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        while poll(Duration::ZERO)? {
            events.push(read()?);
        }
        Ok(events)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng, I = TerminalInput> {
    game: Game<R>,
    store: HighScoreStore,
    input: I,
    tick_period: Duration,
}

impl<R: Rng, I: Input> App<R, I> {
    pub(crate) fn new(
        game: Game<R>,
        store: HighScoreStore,
        input: I,
        tick_period: Duration,
    ) -> Self {
        App {
            game,
            store,
            input,
            tick_period,
        }
    }

    /// Run the game until the snake dies, fills the board, or the player
    /// quits, then save the high score.  Returns the final score.
    ///
    /// The high score is saved even if reading input or drawing fails; the
    /// loop's error is then returned in preference to any save error.
    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> anyhow::Result<u32> {
        let played = self.play(terminal);
        let score = self.game.score();
        let high_score = self.game.finish();
        let saved = self.store.save(high_score);
        played?;
        saved?;
        Ok(score)
    }

    fn play<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| self.game.draw(frame))?;
        while !self.game.terminated() {
            let next_tick = Instant::now() + self.tick_period;
            self.game.handle_events(self.input.pending()?);
            self.game.advance();
            terminal.draw(|frame| self.game.draw(frame))?;
            std::thread::sleep(next_tick.saturating_duration_since(Instant::now()));
        }
        Ok(())
    }
}
