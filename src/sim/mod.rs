//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only through the `now` (ms) passed in by the caller
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod food;
pub mod geom;
pub mod mode;
pub mod mongoose;
pub mod obstacle;
pub mod powerup;
pub mod session;
pub mod snake;
pub mod state;
pub mod tick;

pub use collision::LossCause;
pub use effects::{GameOverAnimation, Particle, ParticleSystem, PortalEffect, wall_pulse};
pub use food::Food;
pub use geom::{Direction, Playfield, Position, Rect};
pub use mode::GameMode;
pub use mongoose::{Behavior, Mongoose};
pub use obstacle::generate_obstacles;
pub use powerup::{ActivePowerUps, PowerUp, PowerUpKind};
pub use session::Session;
pub use snake::{Snake, Step};
pub use state::{GameEvent, GamePhase, GameResult, GameState};
pub use tick::tick;
