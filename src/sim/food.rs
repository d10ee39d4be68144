//! The single collectible food item

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{Playfield, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub pos: Position,
    /// Pulse animation phase (radians)
    #[serde(skip)]
    pub pulse_phase: f32,
}

impl Food {
    pub fn at(pos: Position) -> Self {
        Self {
            pos,
            pulse_phase: 0.0,
        }
    }

    /// Pick a uniformly random tile. Only alignment is guaranteed here;
    /// avoiding obstacles is up to the caller.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, field: &Playfield) {
        self.pos = field.random_tile(rng);
    }

    /// Advance the pulse animation by one frame
    pub fn update(&mut self) {
        self.pulse_phase = (self.pulse_phase + 0.1) % std::f32::consts::TAU;
    }

    /// Render scale for the pulse, 1.0 ± 0.1
    pub fn scale(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * 0.1
    }
}
