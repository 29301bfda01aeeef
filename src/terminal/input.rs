use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::events::GameCommand;
use crate::map::direction::Direction;

/// Maps key presses to game commands; anything unmapped is ignored.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<KeyCode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        for (keys, direction) in [
            ([KeyCode::Up, KeyCode::Char('w')], Direction::Up),
            ([KeyCode::Down, KeyCode::Char('s')], Direction::Down),
            ([KeyCode::Left, KeyCode::Char('a')], Direction::Left),
            ([KeyCode::Right, KeyCode::Char('d')], Direction::Right),
        ] {
            for key in keys {
                key_bindings.insert(key, GameCommand::MovePlayer(direction));
            }
        }

        // Game actions
        key_bindings.insert(KeyCode::Char('p'), GameCommand::TogglePause);
        key_bindings.insert(KeyCode::Char('m'), GameCommand::ToggleMute);
        key_bindings.insert(KeyCode::Char('r'), GameCommand::Restart);
        key_bindings.insert(KeyCode::Esc, GameCommand::Exit);
        key_bindings.insert(KeyCode::Char('q'), GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    /// The command bound to a key-down event, if any.
    ///
    /// Letters match regardless of case; Ctrl+C always exits since raw mode swallows SIGINT.
    pub fn command_for(&self, event: &Event) -> Option<GameCommand> {
        let Event::Key(KeyEvent {
            code, kind, modifiers, ..
        }) = event
        else {
            return None;
        };
        if *kind == KeyEventKind::Release {
            return None;
        }
        if modifiers.contains(KeyModifiers::CONTROL) && *code == KeyCode::Char('c') {
            return Some(GameCommand::Exit);
        }

        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => *other,
        };
        self.key_bindings.get(&code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrows_and_wasd_move() {
        let bindings = Bindings::default();
        assert_eq!(
            bindings.command_for(&press(KeyCode::Left)),
            Some(GameCommand::MovePlayer(Direction::Left))
        );
        assert_eq!(
            bindings.command_for(&press(KeyCode::Char('W'))),
            Some(GameCommand::MovePlayer(Direction::Up))
        );
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let bindings = Bindings::default();
        assert_eq!(bindings.command_for(&press(KeyCode::Char('z'))), None);
        assert_eq!(bindings.command_for(&Event::FocusGained), None);
    }

    #[test]
    fn test_ctrl_c_exits() {
        let bindings = Bindings::default();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(bindings.command_for(&event), Some(GameCommand::Exit));
    }
}
