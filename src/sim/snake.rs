//! The player's snake
//!
//! The body is stored head first. `target_len` grows independently of the
//! body; each accepted move prepends a head and truncates the tail back to
//! `target_len`, so growth shows up one segment per move.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{tile_hits_rect, tiles_touch};
use super::geom::{Direction, Playfield, Position, Rect};
use super::mode::GameMode;
use super::powerup::{ActivePowerUps, PowerUpKind};
use crate::consts::GROWTH_GLOW_MS;

/// Outcome of an accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// New head position
    pub head: Position,
    /// No tail segment was dropped this move
    pub grew: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Segments, head first
    pub body: VecDeque<Position>,
    /// Length the body is truncated to after each move
    pub target_len: usize,
    pub direction: Direction,
    /// Timestamp of the last accepted move (ms)
    pub last_move: u64,
    /// Move interval without power-ups (ms)
    pub base_interval: u64,
    /// Current move interval (ms)
    pub move_interval: u64,
    pub power_ups: ActivePowerUps,
    /// Timestamp of the last growth, drives the glow
    pub last_growth: Option<u64>,
}

impl Snake {
    /// A one-segment snake heading right
    pub fn new(start: Position, move_interval: u64) -> Self {
        Self::from_segments([start], Direction::Right, move_interval)
    }

    /// Build a snake from explicit segments (head first)
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        move_interval: u64,
    ) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        Self {
            target_len: body.len().max(1),
            body,
            direction,
            last_move: 0,
            base_interval: move_interval,
            move_interval,
            power_ups: ActivePowerUps::default(),
            last_growth: None,
        }
    }

    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Change heading; rejected when parallel to the current one
    ///
    /// Returns whether the new direction was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let accepted = match direction {
            Direction::None => false,
            Direction::Up | Direction::Down => !self.direction.is_vertical(),
            Direction::Left | Direction::Right => !self.direction.is_horizontal(),
        };
        if accepted {
            self.direction = direction;
        }
        accepted
    }

    /// Move one tile if the move interval has elapsed since the last move
    pub fn advance(&mut self, now: u64, mode: GameMode, field: &Playfield) -> Option<Step> {
        if now.saturating_sub(self.last_move) < self.move_interval {
            return None;
        }
        if self.direction == Direction::None {
            return None;
        }
        self.last_move = now;

        let mut head = self.head().offset(self.direction.delta());
        if mode.wraps() {
            head = field.wrap(head);
        }

        self.body.push_front(head);
        let mut truncated = false;
        while self.body.len() > self.target_len {
            self.body.pop_back();
            truncated = true;
        }

        let grew = !truncated;
        if grew {
            self.last_growth = Some(now);
        }
        Some(Step { head, grew })
    }

    /// Lengthen by one segment; takes effect on the next move
    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    /// Head overlaps another segment
    pub fn hits_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }

    /// Head left the playfield; never true in wrap-around mode
    pub fn out_of_bounds(&self, mode: GameMode, field: &Playfield) -> bool {
        match mode {
            GameMode::Unbounded => false,
            GameMode::PrisonYard | GameMode::ObstacleCourse | GameMode::MongooseInfested => {
                !field.contains(self.head())
            }
        }
    }

    pub fn hits_obstacle(&self, obstacles: &[Rect]) -> bool {
        let head = self.head();
        obstacles.iter().any(|o| tile_hits_rect(head, o))
    }

    pub fn hits_mongoose(&self, mongoose_pos: Vec2) -> bool {
        tiles_touch(self.head().as_vec2(), mongoose_pos)
    }

    /// Activate a buff until `now + duration_ms`
    pub fn apply_power_up(&mut self, kind: PowerUpKind, now: u64, duration_ms: u64) {
        self.power_ups.activate(kind, now.saturating_add(duration_ms));
        if kind == PowerUpKind::Speed {
            self.move_interval = self.base_interval / 2;
        }
    }

    /// Drop elapsed buffs and undo their effects
    pub fn expire_power_ups(&mut self, now: u64) -> Vec<PowerUpKind> {
        let expired = self.power_ups.expire(now);
        if expired.contains(&PowerUpKind::Speed) {
            self.move_interval = self.base_interval;
        }
        expired
    }

    pub fn has_power_up(&self, kind: PowerUpKind) -> bool {
        self.power_ups.is_active(kind)
    }

    /// Glow strength in [0, 1], fading over half a second after growth
    pub fn glow(&self, now: u64) -> f32 {
        match self.last_growth {
            Some(t) if now.saturating_sub(t) < GROWTH_GLOW_MS => {
                1.0 - now.saturating_sub(t) as f32 / GROWTH_GLOW_MS as f32
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use proptest::prelude::*;

    fn field() -> Playfield {
        Playfield::new(200, 200)
    }

    #[test]
    fn test_respects_move_interval() {
        let mut snake = Snake::new(Position::new(100, 100), 100);
        assert!(snake.advance(50, GameMode::PrisonYard, &field()).is_none());
        let step = snake.advance(100, GameMode::PrisonYard, &field()).unwrap();
        assert_eq!(step.head, Position::new(120, 100));
        assert!(snake.advance(199, GameMode::PrisonYard, &field()).is_none());
        assert!(snake.advance(200, GameMode::PrisonYard, &field()).is_some());
        assert_eq!(snake.head(), Position::new(140, 100));
    }

    #[test]
    fn test_growth_adds_one_segment_per_grow() {
        let mut snake = Snake::new(Position::new(20, 20), 100);
        let step = snake.advance(100, GameMode::PrisonYard, &field()).unwrap();
        assert!(!step.grew);
        assert_eq!(snake.len(), 1);

        snake.grow();
        let step = snake.advance(200, GameMode::PrisonYard, &field()).unwrap();
        assert!(step.grew);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.last_growth, Some(200));

        let step = snake.advance(300, GameMode::PrisonYard, &field()).unwrap();
        assert!(!step.grew);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_direction_change_between_moves_keeps_cadence() {
        let mut snake = Snake::new(Position::new(100, 100), 100);
        snake.advance(100, GameMode::PrisonYard, &field());
        assert!(snake.set_direction(Direction::Down));
        assert_eq!(snake.last_move, 100);
        assert!(snake.advance(150, GameMode::PrisonYard, &field()).is_none());
        snake.advance(200, GameMode::PrisonYard, &field());
        assert_eq!(snake.head(), Position::new(120, 120));
    }

    #[test]
    fn test_wraps_only_in_unbounded() {
        let mut snake = Snake::new(Position::new(180, 60), 100);
        snake.advance(100, GameMode::Unbounded, &field());
        assert_eq!(snake.head(), Position::new(0, 60));
        assert!(!snake.out_of_bounds(GameMode::Unbounded, &field()));

        let mut snake = Snake::new(Position::new(180, 60), 100);
        snake.advance(100, GameMode::PrisonYard, &field());
        assert_eq!(snake.head(), Position::new(200, 60));
        assert!(snake.out_of_bounds(GameMode::PrisonYard, &field()));
    }

    #[test]
    fn test_wraps_top_edge() {
        let mut snake = Snake::from_segments([Position::new(40, 0)], Direction::Up, 100);
        snake.advance(100, GameMode::Unbounded, &field());
        assert_eq!(snake.head(), Position::new(40, 200 - TILE_SIZE));
    }

    #[test]
    fn test_self_collision() {
        // Head at (40,40) curling back onto its own body
        let mut snake = Snake::from_segments(
            [
                Position::new(40, 40),
                Position::new(60, 40),
                Position::new(60, 60),
                Position::new(40, 60),
                Position::new(20, 60),
            ],
            Direction::Down,
            100,
        );
        assert!(!snake.hits_self());
        snake.grow();
        snake.advance(100, GameMode::PrisonYard, &field());
        assert_eq!(snake.head(), Position::new(40, 60));
        assert!(snake.hits_self());
    }

    #[test]
    fn test_obstacle_and_mongoose_hits() {
        let snake = Snake::new(Position::new(60, 60), 100);
        assert!(snake.hits_obstacle(&[Rect::new(40, 40, 40, 40)]));
        assert!(!snake.hits_obstacle(&[Rect::new(80, 40, 40, 40)]));
        assert!(snake.hits_mongoose(Vec2::new(70.5, 45.0)));
        assert!(!snake.hits_mongoose(Vec2::new(80.0, 60.0)));
    }

    #[test]
    fn test_speed_power_up_reverts() {
        let mut snake = Snake::new(Position::new(100, 100), 100);
        snake.apply_power_up(PowerUpKind::Speed, 1000, 5000);
        assert_eq!(snake.move_interval, 50);
        assert!(snake.expire_power_ups(5999).is_empty());
        assert_eq!(snake.expire_power_ups(6000), vec![PowerUpKind::Speed]);
        assert_eq!(snake.move_interval, 100);
        assert!(!snake.has_power_up(PowerUpKind::Speed));
    }

    #[test]
    fn test_glow_fades() {
        let mut snake = Snake::new(Position::new(100, 100), 100);
        assert_eq!(snake.glow(0), 0.0);
        snake.last_growth = Some(1000);
        assert_eq!(snake.glow(1000), 1.0);
        assert!((snake.glow(1250) - 0.5).abs() < 1e-6);
        assert_eq!(snake.glow(1500), 0.0);
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_never_reverses(start in any_direction(), turns in prop::collection::vec(any_direction(), 0..20)) {
            let mut snake = Snake::from_segments([Position::new(100, 100)], start, 100);
            for turn in turns {
                snake.set_direction(turn);
            }
            let current = snake.direction;
            prop_assert!(!snake.set_direction(current.opposite()));
            prop_assert_eq!(snake.direction, current);
        }

        #[test]
        fn prop_body_matches_target_without_growth(
            turns in prop::collection::vec(any_direction(), 1..60),
            grow_at in prop::collection::hash_set(0usize..60, 0..10),
        ) {
            let field = Playfield::new(400, 400);
            let mut snake = Snake::new(Position::new(200, 200), 100);
            for (i, turn) in turns.into_iter().enumerate() {
                if grow_at.contains(&i) {
                    snake.grow();
                }
                snake.set_direction(turn);
                let now = (i as u64 + 1) * 100;
                if let Some(step) = snake.advance(now, GameMode::Unbounded, &field) {
                    prop_assert!(snake.len() <= snake.target_len);
                    if !step.grew {
                        prop_assert_eq!(snake.len(), snake.target_len);
                    }
                }
            }
        }

        #[test]
        fn prop_unbounded_never_out_of_bounds(x in -1000i32..1000, y in -1000i32..1000) {
            let snake = Snake::new(Position::new(x, y), 100);
            prop_assert!(!snake.out_of_bounds(GameMode::Unbounded, &field()));
        }
    }
}
