use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Right) => Some(Command::Right),
            _ => None,
        }
    }
}
