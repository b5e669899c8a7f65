pub mod drawer;
pub mod textures;
pub mod types;

pub use drawer::{DrawError, TerminalDrawer, LARGE_TEXT_SIZE};
pub use textures::{CharPattern, Texture, TextureAtlas};
pub use types::{PixelFrame, PixelScale, StyledCell};
