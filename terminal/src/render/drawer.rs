use std::ops::Range;

use common::{size_cal, Align, Canvas, Drawer, Rgba, TextOpts};
use ratatui::backend::Backend;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use thiserror::Error;

use super::textures::TextureAtlas;
use super::types::{to_color, PixelFrame, PixelScale, StyledCell};

/// Text at or above this size is drawn bold.
pub const LARGE_TEXT_SIZE: i32 = 40;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("texture {0} is not loaded")]
    UnknownTexture(String),
    #[error("terminal i/o failed")]
    Io(#[from] std::io::Error),
}

/// Draws on a terminal as if it were a pixel surface of `columns * scale` by `rows * scale`.
pub struct TerminalDrawer<B: Backend> {
    terminal: Terminal<B>,
    frame: PixelFrame,
    atlas: TextureAtlas,
    scale: PixelScale,
    background_color: Rgba,
    presented: u64,
}

impl<B: Backend> TerminalDrawer<B> {
    pub fn new(
        terminal: Terminal<B>,
        columns: u16,
        rows: u16,
        scale: PixelScale,
        atlas: TextureAtlas,
    ) -> Self {
        Self {
            terminal,
            frame: PixelFrame::new(columns as usize, rows as usize),
            atlas,
            scale,
            background_color: Rgba::WHITE,
            presented: 0,
        }
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background_color = color;
        self
    }

    pub fn frame(&self) -> &PixelFrame {
        &self.frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    fn width_px(&self) -> i32 {
        self.frame.columns() as i32 * self.scale.horizontal
    }

    fn height_px(&self) -> i32 {
        self.frame.rows() as i32 * self.scale.vertical
    }

    /// Cells touched by a pixel rectangle, as column and row ranges.
    fn cells(&self, x: i32, y: i32, w: i32, h: i32) -> (Range<i32>, Range<i32>) {
        let (sx, sy) = (self.scale.horizontal, self.scale.vertical);
        let columns = x.div_euclid(sx)..(x + w + sx - 1).div_euclid(sx);
        let rows = y.div_euclid(sy)..(y + h + sy - 1).div_euclid(sy);
        (columns, rows)
    }

    fn flush(&mut self) -> Result<(), DrawError> {
        let lines = self.frame.to_lines();
        self.terminal.draw(|f| {
            let area = f.area();
            f.render_widget(Paragraph::new(lines), area);
        })?;
        Ok(())
    }
}

impl<B: Backend> Canvas for TerminalDrawer<B> {
    fn background(&mut self, color: Rgba) -> anyhow::Result<()> {
        if !color.is_transparent() {
            let style = Style::default().bg(to_color(color));
            self.frame.fill(StyledCell { ch: ' ', style });
        }
        Ok(())
    }

    fn colored_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) -> anyhow::Result<()> {
        if color.is_transparent() {
            return Ok(());
        }
        let (columns, rows) = self.cells(x, y, w, h);
        let style = Style::default().bg(to_color(color));
        self.frame.fill_rect(columns, rows, StyledCell { ch: ' ', style });
        Ok(())
    }

    fn textured_rect(&mut self, x: i32, y: i32, w: i32, h: i32, texture: &str) -> anyhow::Result<()> {
        let texture = self
            .atlas
            .get(texture)
            .ok_or_else(|| DrawError::UnknownTexture(texture.to_string()))?;
        let style = Style::default().fg(to_color(texture.color));
        let (columns, rows) = self.cells(x, y, w, h);

        for (dy, row) in rows.enumerate() {
            for (dx, column) in columns.clone().enumerate() {
                let glyph = texture.pattern.glyph_at(dx, dy);
                self.frame.patch(column, row, glyph, style);
            }
        }
        Ok(())
    }

    fn text(&mut self, content: &str, opts: &TextOpts) -> anyhow::Result<()> {
        let column = size_cal(self.width_px(), opts.x_fraction).div_euclid(self.scale.horizontal);
        let row = size_cal(self.height_px(), opts.y_fraction).div_euclid(self.scale.vertical);
        let len = content.chars().count() as i32;
        let start = match opts.align {
            Align::Left => column,
            Align::Right => column - (len - 1).max(0),
            Align::Center => column - len / 2,
        };

        let mut style = Style::default().fg(to_color(opts.color));
        if opts.size >= LARGE_TEXT_SIZE {
            style = style.add_modifier(Modifier::BOLD);
        }
        for (i, ch) in content.chars().enumerate() {
            self.frame.patch(start + i as i32, row, ch, style);
        }
        Ok(())
    }
}

impl<B: Backend + Send> Drawer for TerminalDrawer<B> {
    fn present(
        &mut self,
        render: &mut dyn FnMut(&mut dyn Canvas) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        self.frame.clear();
        self.background(self.background_color)?;
        render(self)?;
        self.flush()?;
        self.presented += 1;
        Ok(())
    }

    fn screen_width(&self) -> i32 {
        self.width_px()
    }

    fn screen_height(&self) -> i32 {
        self.height_px()
    }
}
