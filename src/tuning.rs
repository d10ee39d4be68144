//! Data-driven game balance
//!
//! Every timing, probability and speed the simulation uses lives here so a
//! JSON override can rebalance the game without touching the code. Missing
//! fields fall back to the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Snake ===
    /// Milliseconds between snake moves at normal speed
    pub move_interval_ms: u64,
    /// Points per food
    pub food_score: u32,
    /// Score step that triggers the level-up jingle
    pub level_up_every: u32,

    // === Power-ups ===
    /// How long a collected power-up stays active (ms)
    pub power_up_duration_ms: u64,
    /// How long an uncollected power-up stays on the field (ms)
    pub power_up_field_ms: u64,
    /// Chance to spawn a power-up after eating, when none is on the field
    pub power_up_spawn_chance: f64,

    // === Mongoose ===
    /// Movement speed (playfield units per second)
    pub mongoose_speed: f32,
    /// Direction recompute interval in scatter behavior (ms)
    pub scatter_recompute_ms: u64,
    /// Direction recompute interval in chase behavior (ms)
    pub chase_recompute_ms: u64,
    /// Time spent in each behavior before toggling (ms)
    pub behavior_duration_ms: u64,
    /// Probability that a chase recompute targets the snake head
    pub chase_probability: f64,
    /// Full width of the random offset used when not targeting the head
    pub chase_jitter: f32,

    // === Obstacles ===
    /// Placement attempts per session (some are rejected near the spawn)
    pub obstacle_attempts: u32,
    /// Obstacle side length
    pub obstacle_size: i32,
    /// Obstacles closer than this to the spawn point on both axes are dropped
    pub obstacle_clearance: i32,

    // === Food placement ===
    /// Random rolls before falling back to a free-tile scan
    pub max_placement_rolls: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_interval_ms: 100,
            food_score: 10,
            level_up_every: 100,

            power_up_duration_ms: 5000,
            power_up_field_ms: 10_000,
            power_up_spawn_chance: 0.25,

            // 1.5 units per frame at 60 Hz
            mongoose_speed: 90.0,
            scatter_recompute_ms: 1000,
            chase_recompute_ms: 1500,
            behavior_duration_ms: 7000,
            chase_probability: 0.7,
            chase_jitter: 200.0,

            obstacle_attempts: 5,
            obstacle_size: 40,
            obstacle_clearance: 60,

            max_placement_rolls: 1000,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "move_interval_ms": 80, "food_score": 5 }"#).unwrap();
        assert_eq!(tuning.move_interval_ms, 80);
        assert_eq!(tuning.food_score, 5);
        assert_eq!(tuning.power_up_duration_ms, 5000);
        assert_eq!(tuning.behavior_duration_ms, 7000);
    }

    #[test]
    fn test_malformed_override_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert!(Tuning::from_json(r#"{ "food_score": "ten" }"#).is_err());
    }
}
