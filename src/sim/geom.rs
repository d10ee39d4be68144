//! Grid geometry: tile positions, rectangles and the playfield
//!
//! All gameplay coordinates are integer playfield units. Snake segments,
//! food, power-ups and obstacles sit on multiples of `TILE_SIZE`; only the
//! mongoose moves continuously (see `mongoose`).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;

/// Top-left corner of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a displacement
    #[inline]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// The tile-sized square whose top-left corner is this position
    #[inline]
    pub fn tile(self) -> Rect {
        Rect::new(self.x, self.y, TILE_SIZE, TILE_SIZE)
    }
}

/// Axis-aligned rectangle (top-left origin, half-open extents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Point containment, left/top inclusive and right/bottom exclusive
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// Strict overlap; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Stationary
    None,
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Unit displacement scaled by the tile size
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -TILE_SIZE),
            Direction::Down => (0, TILE_SIZE),
            Direction::Left => (-TILE_SIZE, 0),
            Direction::Right => (TILE_SIZE, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Moves along x (left/right)
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Moves along y (up/down)
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// The rectangular play area, sized in whole tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_WIDTH, crate::consts::DEFAULT_HEIGHT)
    }
}

impl Playfield {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn columns(&self) -> i32 {
        self.width / TILE_SIZE
    }

    pub fn rows(&self) -> i32 {
        self.height / TILE_SIZE
    }

    /// Tile-aligned center, where every snake starts
    pub fn center(&self) -> Position {
        Position::new(
            self.columns() / 2 * TILE_SIZE,
            self.rows() / 2 * TILE_SIZE,
        )
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.rect().contains(pos)
    }

    /// Wrap a position that left the playfield back onto the opposite edge
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// Uniformly random tile-aligned position
    pub fn random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let col = rng.random_range(0..self.columns().max(1));
        let row = rng.random_range(0..self.rows().max(1));
        Position::new(col * TILE_SIZE, row * TILE_SIZE)
    }

    /// Every tile position in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| Position::new(col * TILE_SIZE, row * TILE_SIZE))
        })
    }

    /// Largest x/y a tile-sized body may occupy
    pub fn max_tile_origin(&self) -> Vec2 {
        Vec2::new(
            (self.width - TILE_SIZE) as f32,
            (self.height - TILE_SIZE) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rect_contains_half_open() {
        let r = Rect::new(40, 40, 40, 40);
        assert!(r.contains(Position::new(40, 40)));
        assert!(r.contains(Position::new(60, 79)));
        assert!(!r.contains(Position::new(80, 40)));
        assert!(!r.contains(Position::new(40, 80)));
    }

    #[test]
    fn test_rect_overlap_edges() {
        let a = Rect::new(0, 0, 20, 20);
        assert!(a.overlaps(&Rect::new(10, 10, 20, 20)));
        assert!(!a.overlaps(&Rect::new(20, 0, 20, 20)));
        assert!(!a.overlaps(&Rect::new(0, 20, 20, 20)));
    }

    #[test]
    fn test_wrap_both_edges() {
        let field = Playfield::new(200, 100);
        assert_eq!(field.wrap(Position::new(-20, 40)), Position::new(180, 40));
        assert_eq!(field.wrap(Position::new(200, 40)), Position::new(0, 40));
        assert_eq!(field.wrap(Position::new(60, -20)), Position::new(60, 80));
        assert_eq!(field.wrap(Position::new(60, 100)), Position::new(60, 0));
    }

    #[test]
    fn test_random_tile_is_aligned_and_inside() {
        let field = Playfield::new(200, 100);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let p = field.random_tile(&mut rng);
            assert!(field.contains(p));
            assert_eq!(p.x % TILE_SIZE, 0);
            assert_eq!(p.y % TILE_SIZE, 0);
        }
    }

    #[test]
    fn test_center_is_tile_aligned() {
        let field = Playfield::new(810, 610);
        let c = field.center();
        assert_eq!(c.x % TILE_SIZE, 0);
        assert_eq!(c.y % TILE_SIZE, 0);
    }

    #[test]
    fn test_opposites() {
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(d.opposite().opposite(), d);
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
