mod apple;
mod constants;
mod drawer;
mod event;
mod game_state;
mod object;
mod scene;
mod score;
mod screen;
mod screens;
mod shared;
mod snake;

pub use apple::*;
pub use constants::*;
pub use drawer::*;
pub use event::*;
pub use game_state::*;
pub use object::*;
pub use scene::*;
pub use score::*;
pub use screen::*;
pub use screens::*;
pub use shared::*;
pub use snake::*;
