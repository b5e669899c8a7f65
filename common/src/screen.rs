use crate::constants::UNIT;
use crate::drawer::Drawer;

/// Pixel dimensions of the drawing surface, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameScreen {
    pub width: i32,
    pub height: i32,
}

impl GameScreen {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn from_drawer(drawer: &dyn Drawer) -> Self {
        Self::new(drawer.screen_width(), drawer.screen_height())
    }

    pub fn grid(&self) -> Grid {
        Grid {
            columns: (self.width / UNIT).max(1),
            rows: (self.height / UNIT).max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Cell layout of the playfield, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
}

impl Grid {
    pub fn contains(&self, position: &Position) -> bool {
        position.x >= 0 && position.x < self.columns && position.y >= 0 && position.y < self.rows
    }

    pub fn cell_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    pub fn center(&self) -> Position {
        Position::new(self.columns / 2, self.rows / 2)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Position::new(x, y)))
    }

    /// Top-left pixel corner of a cell.
    pub fn to_pixels(&self, position: &Position) -> (i32, i32) {
        (position.x * UNIT, position.y * UNIT)
    }
}
