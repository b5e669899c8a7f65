/// Default tick interval in milliseconds for the scene loop
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 55;

/// Side of one grid cell in pixels
pub const UNIT: i32 = 20;

/// Body length of a freshly spawned snake
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded per eaten apple
pub const SCORE_UNIT: u64 = 1;

/// Random placement attempts before the apple falls back to scanning for a free cell
pub const MAX_RELOCATE_ATTEMPTS: usize = 64;

pub const SNAKE_HEAD_TEXTURE: &str = "snake_head";
pub const APPLE_TEXTURE: &str = "apple";
