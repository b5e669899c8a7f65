use anyhow::Result;

use crate::constants::SCORE_UNIT;
use crate::drawer::{Align, Canvas, Rgba, TextOpts};
use crate::object::GameObject;

const SCORE_TEXT_SIZE: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    value: u64,
    align: Align,
}

impl Score {
    pub fn new(align: Align) -> Self {
        Self { value: 0, align }
    }

    pub fn increment(&mut self) {
        self.value += SCORE_UNIT;
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    fn text_opts(&self) -> TextOpts {
        let x_fraction = match self.align {
            Align::Left => 0.02,
            Align::Right => 0.98,
            Align::Center => 0.5,
        };
        TextOpts::new(SCORE_TEXT_SIZE, x_fraction, 0.01)
            .color(Rgba::GRAY)
            .align(self.align)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(Align::Right)
    }
}

impl GameObject for Score {
    fn paint(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.text(&self.value.to_string(), &self.text_opts())
    }
}
