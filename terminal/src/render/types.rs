use common::Rgba;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Pixels covered by one character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelScale {
    pub horizontal: i32,
    pub vertical: i32,
}

impl PixelScale {
    pub fn new(horizontal: i32, vertical: i32) -> Self {
        Self { horizontal, vertical }
    }
}

impl Default for PixelScale {
    /// Terminal cells are about twice as tall as wide, so a square grid unit
    /// of 20px spans two columns and one row.
    fn default() -> Self {
        Self::new(10, 20)
    }
}

pub fn to_color(rgba: Rgba) -> Color {
    Color::Rgb(rgba.r, rgba.g, rgba.b)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: Style,
}

impl Default for StyledCell {
    fn default() -> Self {
        Self { ch: ' ', style: Style::default() }
    }
}

/// Off-screen character grid a frame is composed on before it is flushed.
pub struct PixelFrame {
    grid: Vec<Vec<StyledCell>>,
    columns: usize,
    rows: usize,
}

impl PixelFrame {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            grid: vec![vec![StyledCell::default(); columns]; rows],
            columns,
            rows,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.fill(StyledCell::default());
    }

    pub fn fill(&mut self, cell: StyledCell) {
        for row in &mut self.grid {
            row.fill(cell);
        }
    }

    pub fn get(&self, column: i32, row: i32) -> Option<&StyledCell> {
        let (column, row) = (usize::try_from(column).ok()?, usize::try_from(row).ok()?);
        self.grid.get(row)?.get(column)
    }

    fn get_mut(&mut self, column: i32, row: i32) -> Option<&mut StyledCell> {
        let (column, row) = (usize::try_from(column).ok()?, usize::try_from(row).ok()?);
        self.grid.get_mut(row)?.get_mut(column)
    }

    /// Replace a cell. Out-of-frame coordinates are ignored.
    pub fn set(&mut self, column: i32, row: i32, cell: StyledCell) {
        if let Some(target) = self.get_mut(column, row) {
            *target = cell;
        }
    }

    /// Draw a glyph over a cell, keeping the colors `style` leaves unset.
    pub fn patch(&mut self, column: i32, row: i32, ch: char, style: Style) {
        if let Some(target) = self.get_mut(column, row) {
            target.ch = ch;
            target.style = target.style.patch(style);
        }
    }

    pub fn fill_rect(&mut self, columns: std::ops::Range<i32>, rows: std::ops::Range<i32>, cell: StyledCell) {
        for row in rows {
            for column in columns.clone() {
                self.set(column, row, cell);
            }
        }
    }

    pub fn row_text(&self, row: usize) -> String {
        self.grid
            .get(row)
            .map(|cells| cells.iter().map(|cell| cell.ch).collect())
            .unwrap_or_default()
    }

    pub fn to_lines(&self) -> Vec<Line<'static>> {
        self.grid
            .iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| Span::styled(cell.ch.to_string(), cell.style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}
