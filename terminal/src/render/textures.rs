use std::collections::HashMap;

use common::{Rgba, APPLE_TEXTURE, SNAKE_HEAD_TEXTURE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
}

impl CharPattern {
    pub fn new(chars: Vec<Vec<char>>) -> Self {
        Self { chars }
    }

    pub fn single(ch: char) -> Self {
        Self { chars: vec![vec![ch]] }
    }

    /// Glyph at an offset inside a rectangle, repeating the pattern to fill it.
    pub fn glyph_at(&self, dx: usize, dy: usize) -> char {
        let row = match self.chars.len() {
            0 => return ' ',
            rows => &self.chars[dy % rows],
        };
        match row.len() {
            0 => ' ',
            columns => row[dx % columns],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    pub pattern: CharPattern,
    pub color: Rgba,
}

/// Named glyph textures available to `textured_rect`.
#[derive(Clone, Debug, Default)]
pub struct TextureAtlas {
    textures: HashMap<String, Texture>,
}

impl TextureAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// The textures the game objects draw with.
    pub fn standard() -> Self {
        let mut atlas = Self::new();
        atlas.insert(
            SNAKE_HEAD_TEXTURE,
            Texture { pattern: CharPattern::single('█'), color: Rgba::GREEN },
        );
        atlas.insert(
            APPLE_TEXTURE,
            Texture { pattern: CharPattern::single('●'), color: Rgba::RED },
        );
        atlas
    }

    pub fn insert(&mut self, name: &str, texture: Texture) {
        self.textures.insert(name.to_string(), texture);
    }

    pub fn get(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
