use crate::geometry::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Directional intent. `None` until the player presses something; holding a
/// single `Option` keeps the four directions mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    intent: Option<Direction>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent(&self) -> Option<Direction> {
        self.intent
    }

    /// Records `direction` unless it reverses the pending intent or the
    /// direction the snake last moved in. Returns whether it was accepted.
    pub fn press(&mut self, direction: Direction, travel: Direction) -> bool {
        let reverses_intent = self.intent.map(|d| d.opposite()) == Some(direction);
        if reverses_intent || travel.opposite() == direction {
            return false;
        }
        self.intent = Some(direction);
        true
    }

    pub fn reset(&mut self) {
        self.intent = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Steer(Direction),
    Restart,
    Quit,
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    // Release/repeat events are reported on some platforms
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Steer(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Steer(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Steer(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Steer(Direction::Right))
        }
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
