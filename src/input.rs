//! Keyboard-to-command mapping.
//!
//! The rest of the program only deals in [`Command`]s, so the key bindings
//! live in one table here.

use crossterm::event::KeyCode;

/// Everything a key press can ask for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Command {
    TurnLeft,
    TurnRight,
    WalkForward,
    WalkBackward,
    StrafeRight,
    StrafeLeft,
    ToggleSmoothing,
    ToggleMap,
    Quit,
}

const BINDINGS: &[(KeyCode, Command)] = &[
    (KeyCode::Char('a'), Command::TurnLeft),
    (KeyCode::Left, Command::TurnLeft),
    (KeyCode::Char('d'), Command::TurnRight),
    (KeyCode::Right, Command::TurnRight),
    (KeyCode::Char('w'), Command::WalkForward),
    (KeyCode::Up, Command::WalkForward),
    (KeyCode::Char('s'), Command::WalkBackward),
    (KeyCode::Down, Command::WalkBackward),
    (KeyCode::Char('m'), Command::StrafeRight),
    (KeyCode::Char('n'), Command::StrafeLeft),
    (KeyCode::Char('h'), Command::ToggleSmoothing),
    (KeyCode::Char('p'), Command::ToggleMap),
    (KeyCode::Esc, Command::Quit),
    (KeyCode::Char('q'), Command::Quit),
];

impl Command {
    /// the command bound to `key`, if any
    pub fn from_key(key: KeyCode) -> Option<Self> {
        BINDINGS
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, command)| *command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_bindings() {
        assert_eq!(Command::from_key(KeyCode::Char('a')), Some(Command::TurnLeft));
        assert_eq!(Command::from_key(KeyCode::Char('d')), Some(Command::TurnRight));
        assert_eq!(Command::from_key(KeyCode::Char('w')), Some(Command::WalkForward));
        assert_eq!(Command::from_key(KeyCode::Char('s')), Some(Command::WalkBackward));
        assert_eq!(Command::from_key(KeyCode::Char('m')), Some(Command::StrafeRight));
        assert_eq!(Command::from_key(KeyCode::Char('n')), Some(Command::StrafeLeft));
        assert_eq!(Command::from_key(KeyCode::Char('h')), Some(Command::ToggleSmoothing));
        assert_eq!(Command::from_key(KeyCode::Char('p')), Some(Command::ToggleMap));
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
    }

    #[test]
    fn arrows_alias_movement() {
        assert_eq!(Command::from_key(KeyCode::Up), Some(Command::WalkForward));
        assert_eq!(Command::from_key(KeyCode::Left), Some(Command::TurnLeft));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(Command::from_key(KeyCode::Char('z')), None);
        assert_eq!(Command::from_key(KeyCode::Enter), None);
    }
}
