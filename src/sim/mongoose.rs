//! The mongoose: a pursuing antagonist for Mongoose Infested mode
//!
//! Alternates between two behaviors on a fixed duration:
//! - Scatter: heads for a random extreme corner, re-aiming every second
//! - Chase: usually heads for the snake head, sometimes wanders nearby
//!
//! Each re-aim picks the single axis with the larger displacement, which
//! gives orthogonal zig-zag pursuit instead of diagonal movement. Unlike the
//! snake it moves continuously and is clamped to the playfield.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{Playfield, Position};
use crate::consts::MAX_FRAME_DT_MS;
use crate::tuning::Tuning;

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 5;

/// Movement below this (per axis) is not recorded in the trail
const TRAIL_EPSILON: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Scatter,
    Chase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mongoose {
    /// Top-left corner, continuous
    pub pos: Vec2,
    pub behavior: Behavior,
    /// Unit vector along exactly one axis (or zero before the first aim)
    pub heading: Vec2,
    /// Units per second
    pub speed: f32,
    /// When the current behavior started (ms)
    pub behavior_since: u64,
    /// Last time the heading was recomputed (ms)
    pub last_aim: Option<u64>,
    /// Last integration timestamp (ms)
    pub last_update: Option<u64>,
    /// Recent positions for rendering (newest first)
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
    #[serde(skip)]
    last_trail_pos: Vec2,
}

impl Mongoose {
    /// Spawn in a random corner, scattering
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, field: &Playfield, now: u64, tuning: &Tuning) -> Self {
        let max = field.max_tile_origin();
        let corners = [
            Vec2::ZERO,
            Vec2::new(max.x, 0.0),
            Vec2::new(0.0, max.y),
            max,
        ];
        let pos = corners[rng.random_range(0..corners.len())];
        Self::at(pos, now, tuning)
    }

    pub fn at(pos: Vec2, now: u64, tuning: &Tuning) -> Self {
        Self {
            pos,
            behavior: Behavior::Scatter,
            heading: Vec2::ZERO,
            speed: tuning.mongoose_speed,
            behavior_since: now,
            last_aim: None,
            last_update: None,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            last_trail_pos: pos,
        }
    }

    /// Heading recompute interval for the current behavior
    pub fn aim_interval(&self, tuning: &Tuning) -> u64 {
        match self.behavior {
            Behavior::Scatter => tuning.scatter_recompute_ms,
            Behavior::Chase => tuning.chase_recompute_ms,
        }
    }

    /// Per-frame update
    ///
    /// `slowed` halves the speed for this frame only, so the Slow power-up
    /// never leaves a permanent change behind. Returns the new behavior when
    /// it toggled this frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        snake_head: Position,
        slowed: bool,
        rng: &mut R,
        field: &Playfield,
        tuning: &Tuning,
    ) -> Option<Behavior> {
        let mut toggled = None;
        if now.saturating_sub(self.behavior_since) > tuning.behavior_duration_ms {
            self.behavior = match self.behavior {
                Behavior::Scatter => Behavior::Chase,
                Behavior::Chase => Behavior::Scatter,
            };
            self.behavior_since = now;
            toggled = Some(self.behavior);
        }

        let due = self
            .last_aim
            .is_none_or(|t| now.saturating_sub(t) > self.aim_interval(tuning));
        if due {
            self.last_aim = Some(now);
            let target = self.choose_target(snake_head, rng, field, tuning);
            self.steer_toward(target);
        }

        let dt_ms = self
            .last_update
            .map_or(0, |t| now.saturating_sub(t).min(MAX_FRAME_DT_MS));
        self.last_update = Some(now);

        let speed = if slowed { self.speed * 0.5 } else { self.speed };
        self.step(self.heading * speed * (dt_ms as f32 / 1000.0), field);
        self.record_trail();

        toggled
    }

    fn choose_target<R: Rng + ?Sized>(
        &self,
        snake_head: Position,
        rng: &mut R,
        field: &Playfield,
        tuning: &Tuning,
    ) -> Vec2 {
        match self.behavior {
            Behavior::Scatter => Vec2::new(
                if rng.random_bool(0.5) { 0.0 } else { field.width as f32 },
                if rng.random_bool(0.5) { 0.0 } else { field.height as f32 },
            ),
            Behavior::Chase => {
                if rng.random_bool(tuning.chase_probability.clamp(0.0, 1.0)) {
                    snake_head.as_vec2()
                } else {
                    let jitter = Vec2::new(
                        rng.random::<f32>() - 0.5,
                        rng.random::<f32>() - 0.5,
                    );
                    self.pos + jitter * tuning.chase_jitter
                }
            }
        }
    }

    /// Aim along the dominant axis of the displacement to `target`
    pub fn steer_toward(&mut self, target: Vec2) {
        let delta = target - self.pos;
        self.heading = if delta.x.abs() > delta.y.abs() {
            Vec2::new(if delta.x > 0.0 { 1.0 } else { -1.0 }, 0.0)
        } else {
            Vec2::new(0.0, if delta.y > 0.0 { 1.0 } else { -1.0 })
        };
    }

    /// Integrate a displacement and clamp to the playfield
    pub fn step(&mut self, displacement: Vec2, field: &Playfield) {
        self.pos = (self.pos + displacement).clamp(Vec2::ZERO, field.max_tile_origin());
    }

    fn record_trail(&mut self) {
        let moved = (self.pos - self.last_trail_pos).abs();
        if moved.x > TRAIL_EPSILON || moved.y > TRAIL_EPSILON {
            self.trail.push_front(self.pos);
            self.trail.truncate(TRAIL_LENGTH);
            self.last_trail_pos = self.pos;
        }
    }
}
