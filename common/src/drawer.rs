use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const GRAY: Rgba = Rgba::new(128, 128, 128, 255);
    pub const GREEN: Rgba = Rgba::new(0, 200, 0, 255);
    pub const DARK_GREEN: Rgba = Rgba::new(0, 110, 40, 255);
    pub const RED: Rgba = Rgba::new(220, 20, 20, 255);
    pub const YELLOW: Rgba = Rgba::new(230, 200, 20, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

/// Placement of a line of text. The anchor is given as fractions of the screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOpts {
    pub size: i32,
    pub x_fraction: f32,
    pub y_fraction: f32,
    pub color: Rgba,
    pub align: Align,
}

impl TextOpts {
    pub fn new(size: i32, x_fraction: f32, y_fraction: f32) -> Self {
        Self {
            size,
            x_fraction,
            y_fraction,
            color: Rgba::BLACK,
            align: Align::Left,
        }
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Scale a screen dimension by a fraction, truncating towards zero.
pub fn size_cal(size: i32, fraction: f32) -> i32 {
    (size as f32 * fraction) as i32
}

/// Primitive drawing operations available while a frame is being composed.
pub trait Canvas {
    fn background(&mut self, color: Rgba) -> Result<()>;

    fn colored_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) -> Result<()>;

    fn textured_rect(&mut self, x: i32, y: i32, w: i32, h: i32, texture: &str) -> Result<()>;

    fn text(&mut self, content: &str, opts: &TextOpts) -> Result<()>;
}

/// A rendering backend the scene can present frames through.
pub trait Drawer: Canvas + Send {
    /// Clear the frame, draw the background, run `render` and flip the buffer.
    /// The buffer must only be flipped when `render` succeeds.
    fn present(&mut self, render: &mut dyn FnMut(&mut dyn Canvas) -> Result<()>) -> Result<()>;

    fn screen_width(&self) -> i32;

    fn screen_height(&self) -> i32;
}
