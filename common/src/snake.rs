use std::collections::VecDeque;

use anyhow::Result;
use tracing::debug;

use crate::apple::Apple;
use crate::constants::{INITIAL_SNAKE_LENGTH, SNAKE_HEAD_TEXTURE, UNIT};
use crate::drawer::{Canvas, Rgba};
use crate::event::{InputEvent, Key};
use crate::game_state::GameState;
use crate::object::GameObject;
use crate::score::Score;
use crate::screen::{Grid, Position};
use crate::shared::Shared;

const BODY_COLOR: Rgba = Rgba::DARK_GREEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn step(self, from: Position) -> Position {
        match self {
            Direction::Up => Position::new(from.x, from.y - 1),
            Direction::Down => Position::new(from.x, from.y + 1),
            Direction::Left => Position::new(from.x - 1, from.y),
            Direction::Right => Position::new(from.x + 1, from.y),
        }
    }

    /// Steering keys: arrows and WASD.
    pub fn from_key(key: Key) -> Option<Direction> {
        match key {
            Key::Up | Key::Char('w') | Key::Char('W') => Some(Direction::Up),
            Key::Down | Key::Char('s') | Key::Char('S') => Some(Direction::Down),
            Key::Left | Key::Char('a') | Key::Char('A') => Some(Direction::Left),
            Key::Right | Key::Char('d') | Key::Char('D') => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: Option<Direction>,
    steps: u64,
    grid: Grid,
    apple: Shared<Apple>,
    score: Shared<Score>,
}

impl Snake {
    /// A snake of `INITIAL_SNAKE_LENGTH` in the middle of the grid, heading right.
    pub fn new(grid: Grid, apple: Shared<Apple>, score: Shared<Score>) -> Self {
        Self::with_body(Self::initial_body(grid), Direction::Right, grid, apple, score)
    }

    /// Segments of a freshly spawned snake, head first.
    ///
    /// Grids narrower than the initial length spawn a shorter snake.
    pub fn initial_body(grid: Grid) -> VecDeque<Position> {
        let center = grid.center();
        (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|i| Position::new(center.x - i, center.y))
            .take_while(|segment| grid.contains(segment))
            .collect()
    }

    /// Build a snake from explicit segments, head first.
    pub fn with_body(
        body: VecDeque<Position>,
        direction: Direction,
        grid: Grid,
        apple: Shared<Apple>,
        score: Shared<Score>,
    ) -> Self {
        Snake {
            body,
            direction,
            pending: None,
            steps: 0,
            grid,
            apple,
            score,
        }
    }

    pub fn head(&self) -> Option<&Position> {
        self.body.front()
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Queue a direction for the next move. Returns whether it was accepted.
    ///
    /// A turn that would put the head onto the segment right behind it is refused.
    /// Only the latest accepted turn is kept.
    pub fn turn(&mut self, direction: Direction) -> bool {
        let reverses = match (self.body.front(), self.body.get(1)) {
            (Some(head), Some(neck)) => direction.step(*head) == *neck,
            _ => false,
        };
        if reverses {
            return false;
        }

        debug!(?direction, "snake turn queued");
        self.pending = Some(direction);
        true
    }

    /// Move one cell and report `Dead` when the move hits a wall or the body.
    pub fn advance(&mut self) -> GameState {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }

        let Some(head) = self.body.front().copied() else {
            return GameState::Dead;
        };
        let next = self.direction.step(head);

        if !self.grid.contains(&next) {
            debug!(x = next.x, y = next.y, "snake left the grid");
            return GameState::Dead;
        }

        // The tail cell is vacated by this move, so the head may take it.
        let keep = self.body.len().saturating_sub(1);
        if self.body.iter().take(keep).any(|segment| *segment == next) {
            debug!(x = next.x, y = next.y, "snake bit itself");
            return GameState::Dead;
        }

        self.body.push_front(next);
        self.steps += 1;

        let mut apple = self.apple.lock();
        if apple.position() == Some(next) {
            apple.eat(&self.body);
            self.score.lock().increment();
        } else {
            self.body.pop_back();
        }

        GameState::Running
    }
}

impl GameObject for Snake {
    fn paint(&self, canvas: &mut dyn Canvas) -> Result<()> {
        for (i, segment) in self.body.iter().enumerate() {
            let (x, y) = self.grid.to_pixels(segment);
            if i == 0 {
                canvas.textured_rect(x, y, UNIT, UNIT, SNAKE_HEAD_TEXTURE)?;
            } else {
                canvas.colored_rect(x, y, UNIT, UNIT, BODY_COLOR)?;
            }
        }
        Ok(())
    }

    fn update(&mut self) -> Option<GameState> {
        Some(self.advance())
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if let Some(direction) = event.pressed_key().and_then(Direction::from_key) {
            self.turn(direction);
        }
    }
}
