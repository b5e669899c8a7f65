#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Input forwarded from the process driver into the scene loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key { key: Key, state: KeyState },
}

impl InputEvent {
    pub fn pressed(key: Key) -> Self {
        InputEvent::Key { key, state: KeyState::Pressed }
    }

    pub fn released(key: Key) -> Self {
        InputEvent::Key { key, state: KeyState::Released }
    }

    /// The key of a press event, `None` for releases and non-key events.
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            InputEvent::Key { key, state: KeyState::Pressed } => Some(*key),
            _ => None,
        }
    }

    /// Space or Enter pressed, used to start and restart a game.
    pub fn is_start(&self) -> bool {
        matches!(self.pressed_key(), Some(Key::Space | Key::Enter))
    }

    pub fn is_exit(&self) -> bool {
        match self {
            InputEvent::Quit => true,
            InputEvent::Key { key: Key::Escape, state: KeyState::Pressed } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_only_exits_when_pressed() {
        assert!(InputEvent::pressed(Key::Escape).is_exit());
        assert!(!InputEvent::released(Key::Escape).is_exit());
        assert!(InputEvent::Quit.is_exit());
        assert!(!InputEvent::pressed(Key::Space).is_exit());
    }

    #[test]
    fn start_keys() {
        assert!(InputEvent::pressed(Key::Space).is_start());
        assert!(InputEvent::pressed(Key::Enter).is_start());
        assert!(!InputEvent::released(Key::Enter).is_start());
        assert!(!InputEvent::pressed(Key::Char('s')).is_start());
    }
}
