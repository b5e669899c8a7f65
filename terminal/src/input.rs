use common::{InputEvent, Key, KeyState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate a terminal event into a game input. Events the game has no use for yield `None`.
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => Some(translate_key(key)),
        _ => None,
    }
}

fn translate_key(event: &KeyEvent) -> InputEvent {
    // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return InputEvent::Quit;
    }

    let state = match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => KeyState::Pressed,
        KeyEventKind::Release => KeyState::Released,
    };
    let key = match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    InputEvent::Key { key, state }
}
