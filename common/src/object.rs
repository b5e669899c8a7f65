use anyhow::Result;

use crate::drawer::Canvas;
use crate::event::InputEvent;
use crate::game_state::GameState;
use crate::shared::Shared;

/// Something the scene keeps in an active set.
///
/// Painting is mandatory. Updating and event handling are optional: the default
/// `update` reports nothing and the default `handle_event` ignores the event.
pub trait GameObject: Send {
    fn paint(&self, canvas: &mut dyn Canvas) -> Result<()>;

    /// Advance one tick. `Some(state)` is the state this object wants the game in.
    fn update(&mut self) -> Option<GameState> {
        None
    }

    fn handle_event(&mut self, _event: &InputEvent) {}
}

impl<T: GameObject> GameObject for Shared<T> {
    fn paint(&self, canvas: &mut dyn Canvas) -> Result<()> {
        self.lock().paint(canvas)
    }

    fn update(&mut self) -> Option<GameState> {
        self.lock().update()
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.lock().handle_event(event)
    }
}
