use anyhow::Result;

use crate::drawer::{Align, Canvas, Rgba, TextOpts};
use crate::event::InputEvent;
use crate::game_state::GameState;
use crate::object::GameObject;
use crate::score::Score;
use crate::screen::GameScreen;
use crate::shared::Shared;

const TITLE_SIZE: i32 = 60;
const HINT_SIZE: i32 = 20;

/// Title size shrunk to fit short screens.
fn title_size(screen: &GameScreen) -> i32 {
    TITLE_SIZE.min(screen.height / 6).max(HINT_SIZE)
}

/// Welcome text shown before the first game. A start key press begins a game.
#[derive(Debug)]
pub struct MenuScreen {
    screen: GameScreen,
    start_requested: bool,
}

impl MenuScreen {
    pub fn new(screen: GameScreen) -> Self {
        Self { screen, start_requested: false }
    }
}

impl GameObject for MenuScreen {
    fn paint(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.text(
            "SNAKERY",
            &TextOpts::new(title_size(&self.screen), 0.5, 0.3)
                .color(Rgba::DARK_GREEN)
                .align(Align::Center),
        )?;
        canvas.text(
            "press space to start",
            &TextOpts::new(HINT_SIZE, 0.5, 0.55).align(Align::Center),
        )?;
        canvas.text(
            "arrows or wasd to steer, esc to quit",
            &TextOpts::new(HINT_SIZE, 0.5, 0.65)
                .color(Rgba::GRAY)
                .align(Align::Center),
        )
    }

    fn update(&mut self) -> Option<GameState> {
        if std::mem::take(&mut self.start_requested) {
            Some(GameState::Running)
        } else {
            Some(GameState::Menu)
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if event.is_start() {
            self.start_requested = true;
        }
    }
}

/// Final score and a restart hint. A start key press begins a new game.
#[derive(Debug)]
pub struct DeadScreen {
    screen: GameScreen,
    score: Shared<Score>,
    restart_requested: bool,
}

impl DeadScreen {
    pub fn new(screen: GameScreen, score: Shared<Score>) -> Self {
        Self { screen, score, restart_requested: false }
    }
}

impl GameObject for DeadScreen {
    fn paint(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.text(
            "GAME OVER",
            &TextOpts::new(title_size(&self.screen), 0.5, 0.3)
                .color(Rgba::RED)
                .align(Align::Center),
        )?;
        canvas.text(
            &format!("score: {}", self.score.lock().value()),
            &TextOpts::new(HINT_SIZE * 2, 0.5, 0.45).align(Align::Center),
        )?;
        canvas.text(
            "press space to play again, esc to quit",
            &TextOpts::new(HINT_SIZE, 0.5, 0.65)
                .color(Rgba::GRAY)
                .align(Align::Center),
        )
    }

    fn update(&mut self) -> Option<GameState> {
        if std::mem::take(&mut self.restart_requested) {
            Some(GameState::Running)
        } else {
            Some(GameState::Dead)
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if event.is_start() {
            self.restart_requested = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;

    struct Texts(Vec<String>);

    impl Canvas for Texts {
        fn background(&mut self, _color: Rgba) -> Result<()> {
            Ok(())
        }

        fn colored_rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _color: Rgba) -> Result<()> {
            Ok(())
        }

        fn textured_rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _texture: &str) -> Result<()> {
            Ok(())
        }

        fn text(&mut self, content: &str, _opts: &TextOpts) -> Result<()> {
            self.0.push(content.to_string());
            Ok(())
        }
    }

    const SCREEN: GameScreen = GameScreen { width: 400, height: 400 };

    #[test]
    fn menu_waits_for_start() {
        let mut menu = MenuScreen::new(SCREEN);
        assert_eq!(menu.update(), Some(GameState::Menu));

        menu.handle_event(&InputEvent::pressed(Key::Up));
        assert_eq!(menu.update(), Some(GameState::Menu));

        menu.handle_event(&InputEvent::pressed(Key::Space));
        assert_eq!(menu.update(), Some(GameState::Running));
        // The request is consumed by the update that reported it.
        assert_eq!(menu.update(), Some(GameState::Menu));
    }

    #[test]
    fn dead_screen_shows_final_score() {
        let score = Shared::new(Score::default());
        score.lock().increment();
        score.lock().increment();

        let dead = DeadScreen::new(SCREEN, score);
        let mut texts = Texts(Vec::new());
        dead.paint(&mut texts).unwrap();
        assert!(texts.0.iter().any(|t| t == "score: 2"), "{:?}", texts.0);
    }

    #[test]
    fn dead_screen_restarts_on_start_key() {
        let mut dead = DeadScreen::new(SCREEN, Shared::new(Score::default()));
        assert_eq!(dead.update(), Some(GameState::Dead));
        dead.handle_event(&InputEvent::released(Key::Enter));
        assert_eq!(dead.update(), Some(GameState::Dead));
        dead.handle_event(&InputEvent::pressed(Key::Enter));
        assert_eq!(dead.update(), Some(GameState::Running));
    }
}
