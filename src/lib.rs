//! Snake Arcade - a four-mode snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `ui`: Menu and mode selection state machine
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (storage, input)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Grid tile size in playfield units; every snake, food and obstacle
    /// coordinate is a multiple of this.
    pub const TILE_SIZE: i32 = 20;

    /// Playfield used when the canvas size is unknown (native demo, tests)
    pub const DEFAULT_WIDTH: i32 = 800;
    pub const DEFAULT_HEIGHT: i32 = 600;

    /// Largest frame delta fed to continuous movement (ms)
    pub const MAX_FRAME_DT_MS: u64 = 100;

    /// Snake glow lasts this long after growing (ms)
    pub const GROWTH_GLOW_MS: u64 = 500;
}

/// Linear interpolation between `start` and `end`
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Floor a canvas dimension to a whole number of tiles (at least one tile)
#[inline]
pub fn snap_to_tiles(pixels: i32) -> i32 {
    (pixels / consts::TILE_SIZE).max(1) * consts::TILE_SIZE
}
