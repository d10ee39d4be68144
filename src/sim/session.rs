//! One play session: every entity that lives from start to game over
//!
//! Mode-specific entities are only present in their mode, so the update and
//! collision code never has to consult the mode to know whether an obstacle
//! list or a mongoose is meaningful.

use rand::Rng;

use super::collision::{LossCause, inside_any};
use super::effects::{GameOverAnimation, ParticleSystem, PortalEffect};
use super::food::Food;
use super::geom::{Playfield, Position, Rect};
use super::mode::GameMode;
use super::mongoose::{Behavior, Mongoose};
use super::obstacle::generate_obstacles;
use super::powerup::{PowerUp, PowerUpKind};
use super::snake::Snake;
use crate::consts::TILE_SIZE;
use crate::tuning::Tuning;

/// Particles per food burst
pub const EAT_PARTICLES: usize = 20;
/// Particles per power-up pickup
pub const PICKUP_PARTICLES: usize = 30;

/// Food burst color (red)
pub const FOOD_COLOR: [f32; 3] = [1.0, 0.3, 0.3];

#[derive(Debug, Clone)]
pub struct Session {
    pub mode: GameMode,
    pub field: Playfield,
    pub snake: Snake,
    pub food: Food,
    /// Empty unless Obstacle Course
    pub obstacles: Vec<Rect>,
    /// Mongoose Infested only
    pub mongoose: Option<Mongoose>,
    /// Unbounded only
    pub portal: Option<PortalEffect>,
    /// Uncollected item on the field
    pub power_up: Option<PowerUp>,
    pub particles: ParticleSystem,
    pub score: u32,
    /// Advanced only after the session ended
    pub game_over: GameOverAnimation,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(
        mode: GameMode,
        field: Playfield,
        now: u64,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Self {
        let mut snake = Snake::new(field.center(), tuning.move_interval_ms);
        snake.last_move = now;

        let (obstacles, mongoose, portal) = match mode {
            GameMode::PrisonYard => (Vec::new(), None, None),
            GameMode::Unbounded => (Vec::new(), None, Some(PortalEffect::new(rng, &field))),
            GameMode::ObstacleCourse => (generate_obstacles(rng, &field, tuning), None, None),
            GameMode::MongooseInfested => (
                Vec::new(),
                Some(Mongoose::spawn(rng, &field, now, tuning)),
                None,
            ),
        };

        let mut session = Self {
            mode,
            field,
            snake,
            food: Food::at(field.center()),
            obstacles,
            mongoose,
            portal,
            power_up: None,
            particles: ParticleSystem::default(),
            score: 0,
            game_over: GameOverAnimation::default(),
        };
        session.place_food(rng, tuning, None);
        session
    }

    /// Food may go anywhere except obstacles, the snake, a waiting power-up
    /// and `vacated`
    fn food_spot_free(&self, pos: Position, vacated: Option<Position>) -> bool {
        Some(pos) != vacated
            && !inside_any(pos, &self.obstacles)
            && !self.snake.occupies(pos)
            && self.power_up.as_ref().is_none_or(|p| p.pos != pos)
    }

    /// Re-roll the food until it lands on a free tile
    ///
    /// Random rolls are bounded by `max_placement_rolls`; after that the
    /// first free tile in scan order is taken. On a completely full field
    /// the last roll stands.
    pub fn place_food<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
        vacated: Option<Position>,
    ) {
        for _ in 0..tuning.max_placement_rolls {
            self.food.randomize(rng, &self.field);
            if self.food_spot_free(self.food.pos, vacated) {
                return;
            }
        }

        let fallback = self
            .field
            .tiles()
            .find(|&pos| self.food_spot_free(pos, vacated));
        match fallback {
            Some(pos) => {
                log::debug!("Food placed by scan at ({}, {})", pos.x, pos.y);
                self.food.pos = pos;
            }
            None => log::warn!("No free tile for food"),
        }
    }

    /// Maybe drop a power-up on a free tile (one at a time)
    pub fn maybe_spawn_power_up<R: Rng + ?Sized>(&mut self, rng: &mut R, now: u64, tuning: &Tuning) {
        if self.power_up.is_some() {
            return;
        }
        if !rng.random_bool(tuning.power_up_spawn_chance.clamp(0.0, 1.0)) {
            return;
        }

        let kind = PowerUpKind::random(rng);
        for _ in 0..tuning.max_placement_rolls {
            let pos = self.field.random_tile(rng);
            let free = pos != self.food.pos
                && !inside_any(pos, &self.obstacles)
                && !self.snake.occupies(pos);
            if free {
                log::debug!("Spawned {:?} power-up at ({}, {})", kind, pos.x, pos.y);
                self.power_up = Some(PowerUp::new(kind, pos, now, tuning.power_up_field_ms));
                return;
            }
        }
    }

    /// Advance mode-specific entities and decorations for one frame
    ///
    /// Returns the mongoose's new behavior if it switched this frame.
    pub fn update_entities<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<Behavior> {
        let mut switched = None;
        match self.mode {
            GameMode::MongooseInfested => {
                let slowed = self.snake.has_power_up(PowerUpKind::Slow);
                let head = self.snake.head();
                if let Some(mongoose) = self.mongoose.as_mut() {
                    switched = mongoose.update(now, head, slowed, rng, &self.field, tuning);
                }
            }
            GameMode::Unbounded => {
                if let Some(portal) = self.portal.as_mut() {
                    portal.update(now);
                }
            }
            GameMode::PrisonYard | GameMode::ObstacleCourse => {}
        }

        self.food.update();
        self.particles.update();

        if let Some(item) = self.power_up.as_mut() {
            item.update(now);
            if !item.active {
                log::debug!("{:?} power-up left the field uncollected", item.kind);
                self.power_up = None;
            }
        }
        switched
    }

    /// Points for one food at the current buffs
    pub fn food_points(&self, tuning: &Tuning) -> u32 {
        if self.snake.has_power_up(PowerUpKind::Double) {
            tuning.food_score * 2
        } else {
            tuning.food_score
        }
    }

    /// Eat the food if the head is on it; returns points scored
    pub fn consume_food<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
        particle_cap: usize,
    ) -> Option<u32> {
        let eaten = self.food.pos;
        if self.snake.head() != eaten {
            return None;
        }

        self.snake.grow();
        let points = self.food_points(tuning);
        self.score += points;
        self.particles
            .emit(rng, tile_center(eaten), FOOD_COLOR, EAT_PARTICLES, particle_cap);
        self.place_food(rng, tuning, Some(eaten));
        Some(points)
    }

    /// Pick up the power-up if the head is on it
    pub fn collect_power_up<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        rng: &mut R,
        tuning: &Tuning,
        particle_cap: usize,
    ) -> Option<PowerUpKind> {
        let item = self.power_up.take_if(|item| item.pos == self.snake.head())?;
        self.snake
            .apply_power_up(item.kind, now, tuning.power_up_duration_ms);
        self.particles.emit(
            rng,
            tile_center(item.pos),
            item.kind.color(),
            PICKUP_PARTICLES,
            particle_cap,
        );
        Some(item.kind)
    }

    /// First loss condition that holds, checked in a fixed order
    ///
    /// Shield ignores every collision except leaving the playfield.
    pub fn check_loss(&self) -> Option<LossCause> {
        let shielded = self.snake.has_power_up(PowerUpKind::Shield);

        if !shielded && self.snake.hits_self() {
            return Some(LossCause::SelfCollision);
        }
        if !shielded {
            let hit = match self.mode {
                GameMode::MongooseInfested => self
                    .mongoose
                    .as_ref()
                    .is_some_and(|m| self.snake.hits_mongoose(m.pos))
                    .then_some(LossCause::Mongoose),
                GameMode::ObstacleCourse => self
                    .snake
                    .hits_obstacle(&self.obstacles)
                    .then_some(LossCause::Obstacle),
                GameMode::PrisonYard | GameMode::Unbounded => None,
            };
            if hit.is_some() {
                return hit;
            }
        }
        if self.snake.out_of_bounds(self.mode, &self.field) {
            return Some(LossCause::OutOfBounds);
        }
        None
    }
}

fn tile_center(pos: Position) -> glam::Vec2 {
    pos.as_vec2() + glam::Vec2::splat(TILE_SIZE as f32 / 2.0)
}
