/// Discrete phase of the game. Each state owns its own set of active objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Menu,
    Running,
    Dead,
}
