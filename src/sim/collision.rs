//! Collision predicates for the grid
//!
//! Everything here is an axis-aligned test between tile-sized bodies and
//! rectangles. The simulation loop decides which of them apply in the
//! current mode.

use glam::Vec2;

use super::geom::{Position, Rect};
use crate::consts::TILE_SIZE;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    SelfCollision,
    Mongoose,
    Obstacle,
    OutOfBounds,
}

impl LossCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            LossCause::SelfCollision => "ran into itself",
            LossCause::Mongoose => "caught by the mongoose",
            LossCause::Obstacle => "hit an obstacle",
            LossCause::OutOfBounds => "hit the wall",
        }
    }
}

/// A tile at `pos` overlaps `rect`
#[inline]
pub fn tile_hits_rect(pos: Position, rect: &Rect) -> bool {
    pos.tile().overlaps(rect)
}

/// Two tile-sized bodies overlap (used for the continuous mongoose)
#[inline]
pub fn tiles_touch(a: Vec2, b: Vec2) -> bool {
    let size = TILE_SIZE as f32;
    (a.x - b.x).abs() < size && (a.y - b.y).abs() < size
}

/// `pos` lies inside any of the rectangles
pub fn inside_any(pos: Position, rects: &[Rect]) -> bool {
    rects.iter().any(|r| r.contains(pos))
}
