use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use common::{Canvas, Drawer, Rgba, TextOpts};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background(Rgba),
    Rect { x: i32, y: i32, w: i32, h: i32, color: Rgba },
    Texture { x: i32, y: i32, w: i32, h: i32, texture: String },
    Text { content: String, opts: TextOpts },
}

pub type Frame = Vec<DrawCall>;

/// Presented frames, shared with the test after the drawer moved into a scene.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Frame>>>);

impl Recorder {
    pub fn frames(&self) -> Vec<Frame> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Frame> {
        self.0.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

pub struct RecordingDrawer {
    width: i32,
    height: i32,
    current: Frame,
    recorder: Recorder,
    pub fail_present: bool,
}

impl RecordingDrawer {
    pub fn new(width: i32, height: i32) -> (Self, Recorder) {
        let recorder = Recorder::default();
        let drawer = RecordingDrawer {
            width,
            height,
            current: Vec::new(),
            recorder: recorder.clone(),
            fail_present: false,
        };
        (drawer, recorder)
    }
}

impl Canvas for RecordingDrawer {
    fn background(&mut self, color: Rgba) -> Result<()> {
        self.current.push(DrawCall::Background(color));
        Ok(())
    }

    fn colored_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) -> Result<()> {
        self.current.push(DrawCall::Rect { x, y, w, h, color });
        Ok(())
    }

    fn textured_rect(&mut self, x: i32, y: i32, w: i32, h: i32, texture: &str) -> Result<()> {
        self.current.push(DrawCall::Texture { x, y, w, h, texture: texture.to_string() });
        Ok(())
    }

    fn text(&mut self, content: &str, opts: &TextOpts) -> Result<()> {
        self.current.push(DrawCall::Text { content: content.to_string(), opts: *opts });
        Ok(())
    }
}

impl Drawer for RecordingDrawer {
    fn present(&mut self, render: &mut dyn FnMut(&mut dyn Canvas) -> Result<()>) -> Result<()> {
        if self.fail_present {
            bail!("display lost");
        }

        self.current.clear();
        self.background(Rgba::WHITE)?;
        render(self)?;

        let frame = std::mem::take(&mut self.current);
        self.recorder.0.lock().unwrap().push(frame);
        Ok(())
    }

    fn screen_width(&self) -> i32 {
        self.width
    }

    fn screen_height(&self) -> i32 {
        self.height
    }
}

pub fn texts(frame: &Frame) -> Vec<String> {
    frame
        .iter()
        .filter_map(|call| match call {
            DrawCall::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

pub fn textures(frame: &Frame) -> Vec<(i32, i32, String)> {
    frame
        .iter()
        .filter_map(|call| match call {
            DrawCall::Texture { x, y, texture, .. } => Some((*x, *y, texture.clone())),
            _ => None,
        })
        .collect()
}
