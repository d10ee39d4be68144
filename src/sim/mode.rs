//! Game mode catalog

use serde::{Deserialize, Serialize};

/// Playable game modes; exactly one is current during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Walled arena, leaving the playfield is fatal
    #[default]
    PrisonYard,
    /// No walls, the snake wraps around the edges
    Unbounded,
    /// Walled arena with static obstacles
    ObstacleCourse,
    /// Walled arena with a pursuing mongoose
    MongooseInfested,
}

impl GameMode {
    /// All modes in menu order
    pub const ALL: [GameMode; 4] = [
        GameMode::PrisonYard,
        GameMode::Unbounded,
        GameMode::ObstacleCourse,
        GameMode::MongooseInfested,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::PrisonYard => "Prison Yard",
            GameMode::Unbounded => "Unbounded",
            GameMode::ObstacleCourse => "Obstacle Course",
            GameMode::MongooseInfested => "Mongoose Infested",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::PrisonYard => "Classic mode with walls - Don't crash!",
            GameMode::Unbounded => "No walls - Only yourself to fear",
            GameMode::ObstacleCourse => "Navigate through obstacles",
            GameMode::MongooseInfested => "Beware of the hungry mongoose!",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// The snake wraps instead of dying at the edges
    pub fn wraps(&self) -> bool {
        matches!(self, GameMode::Unbounded)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
