use std::collections::HashSet;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, warn};

use crate::constants::{APPLE_TEXTURE, MAX_RELOCATE_ATTEMPTS, UNIT};
use crate::drawer::Canvas;
use crate::object::GameObject;
use crate::screen::{Grid, Position};

#[derive(Debug)]
pub struct Apple {
    position: Option<Position>,
    grid: Grid,
    rng: StdRng,
    eaten: u32,
}

impl Apple {
    /// Create an apple placed on a random cell not covered by `occupied`.
    pub fn new<'a>(
        grid: Grid,
        rng: StdRng,
        occupied: impl IntoIterator<Item = &'a Position>,
    ) -> Self {
        let mut apple = Apple {
            position: None,
            grid,
            rng,
            eaten: 0,
        };
        apple.relocate(occupied);
        apple
    }

    /// The cell the apple is on, or `None` once no free cell is left.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn times_eaten(&self) -> u32 {
        self.eaten
    }

    /// Record that the apple was eaten and move it to a free cell.
    pub fn eat<'a>(&mut self, occupied: impl IntoIterator<Item = &'a Position>) {
        self.eaten += 1;
        self.relocate(occupied);
    }

    /// Move to a cell outside `occupied`, chosen uniformly at random.
    ///
    /// Random draws are capped; after that the first free cell in row-major order is used.
    /// On a completely full grid the apple is taken off the board.
    pub fn relocate<'a>(&mut self, occupied: impl IntoIterator<Item = &'a Position>) {
        let occupied: HashSet<Position> = occupied.into_iter().copied().collect();

        for _ in 0..MAX_RELOCATE_ATTEMPTS {
            let candidate = Position::new(
                self.rng.gen_range(0..self.grid.columns),
                self.rng.gen_range(0..self.grid.rows),
            );
            if !occupied.contains(&candidate) {
                debug!(x = candidate.x, y = candidate.y, "apple relocated");
                self.position = Some(candidate);
                return;
            }
        }

        match self.grid.cells().find(|cell| !occupied.contains(cell)) {
            Some(cell) => {
                debug!(x = cell.x, y = cell.y, "apple relocated by scan");
                self.position = Some(cell);
            }
            None => {
                warn!("no free cell left for the apple");
                self.position = None;
            }
        }
    }
}

impl GameObject for Apple {
    fn paint(&self, canvas: &mut dyn Canvas) -> Result<()> {
        match self.position {
            Some(position) => {
                let (x, y) = self.grid.to_pixels(&position);
                canvas.textured_rect(x, y, UNIT, UNIT, APPLE_TEXTURE)
            }
            None => Ok(()),
        }
    }
}
