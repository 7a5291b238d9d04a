//! Key mapping from terminal events to commands.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the engine
    Action(GameAction),
    /// Start a new game, or restart the current one
    Start,
    /// Toggle pause
    Pause,
    Quit,
}

/// Map keyboard input to a command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => GameAction::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => GameAction::MoveRight,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => GameAction::SoftDrop,

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => GameAction::RotateCw,
        KeyCode::Char('x') | KeyCode::Char('X') => GameAction::RotateCcw,

        KeyCode::Char(' ') => GameAction::HardDrop,

        // Session
        KeyCode::Char('p') | KeyCode::Char('P') => return Some(Command::Pause),
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => return Some(Command::Start),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Command::Quit),

        _ => return None,
    };
    Some(Command::Action(action))
}
