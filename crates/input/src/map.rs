//! Key mapping from terminal events to engine intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to intents.
///
/// Escape is reported by [`should_quit`] and maps to [`Intent::Stop`] here.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    match key.code {
        // Aim
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Intent::MoveAim { dx: 0, dy: -1 })
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Intent::MoveAim { dx: 0, dy: 1 })
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Intent::MoveAim { dx: -1, dy: 0 })
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Intent::MoveAim { dx: 1, dy: 0 })
        }

        // Rotation
        KeyCode::Char('q')
        | KeyCode::Char('Q')
        | KeyCode::Char('e')
        | KeyCode::Char('E')
        | KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char(' ') => Some(Intent::Rotate),
        KeyCode::Char('c') | KeyCode::Char('C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Intent::Rotate)
        }

        // Actions
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Swap),
        KeyCode::Enter => Some(Intent::DropAtAim),
        KeyCode::Esc => Some(Intent::Stop),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
