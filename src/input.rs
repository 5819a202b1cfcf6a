use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Move(Direction),
    Confirm,
    Quit,
}

impl Command {
    /// `None` for anything the game doesn't react to, releases and repeats
    /// included.
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind != KeyEventKind::Press {
            return None;
        }

        match ev {
            ev if is_ctrl_c(ev) => Some(Command::Quit),
            KeyEvent { code, .. } => match code {
                KeyCode::Up => Some(Command::Move(Direction::Up)),
                KeyCode::Down => Some(Command::Move(Direction::Down)),
                KeyCode::Left => Some(Command::Move(Direction::Left)),
                KeyCode::Right => Some(Command::Move(Direction::Right)),
                KeyCode::Enter => Some(Command::Confirm),
                KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
                _ => None,
            }
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers, .. } if modifiers.contains(KeyModifiers::CONTROL))
}
