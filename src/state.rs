use bevy::prelude::*;

/// Run state of the simulation. The board is editable in both `Paused` and
/// `Running`; only `Running` advances generations.
#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Load,
    Paused,
    Running,
}

impl GameState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Load => "Loading",
            Self::Paused => "Paused",
            Self::Running => "Running",
        }
    }
}
