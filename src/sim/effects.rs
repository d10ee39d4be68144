//! Decorative effects (not gameplay-affecting)
//!
//! Particles, the Unbounded edge shimmer and the game-over card animation.
//! They advance once per frame alongside the simulation but never feed back
//! into it.

use glam::Vec2;
use rand::Rng;

use super::geom::Playfield;
use crate::lerp;

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per frame
    pub vel: Vec2,
    pub color: [f32; 3],
    /// 1 at birth, removed at 0
    pub life: f32,
}

/// Life lost per frame
const PARTICLE_DECAY: f32 = 0.02;

/// Burst particles (eating, pickups)
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Emit up to `count` particles at `pos`, never exceeding `cap` alive
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        color: [f32; 3],
        count: usize,
        cap: usize,
    ) {
        let room = cap.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 5.0;
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: 1.0,
            });
        }
    }

    pub fn update(&mut self) {
        self.particles.retain(|p| p.life > 0.0);
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= PARTICLE_DECAY;
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// A shimmering point on the playfield edge
#[derive(Debug, Clone)]
pub struct EdgeParticle {
    pub base: Vec2,
    /// Unit axis the particle oscillates along (perpendicular to its edge)
    pub axis: Vec2,
    /// Angular speed (rad/s)
    pub speed: f32,
    pub amplitude: f32,
    pub pos: Vec2,
}

impl EdgeParticle {
    fn new<R: Rng + ?Sized>(rng: &mut R, base: Vec2, axis: Vec2) -> Self {
        Self {
            base,
            axis,
            speed: 1.0 + rng.random::<f32>(),
            amplitude: 5.0 + rng.random::<f32>() * 5.0,
            pos: base,
        }
    }
}

/// Edge shimmer marking the wrap-around portals in Unbounded mode
#[derive(Debug, Clone)]
pub struct PortalEffect {
    pub particles: Vec<EdgeParticle>,
}

/// Spacing between edge particles
const EDGE_SPACING: usize = 10;

impl PortalEffect {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, field: &Playfield) -> Self {
        let (w, h) = (field.width as f32, field.height as f32);
        let mut particles = Vec::new();
        for x in (0..field.width).step_by(EDGE_SPACING) {
            particles.push(EdgeParticle::new(rng, Vec2::new(x as f32, 0.0), Vec2::Y));
            particles.push(EdgeParticle::new(rng, Vec2::new(x as f32, h), Vec2::Y));
        }
        for y in (0..field.height).step_by(EDGE_SPACING) {
            particles.push(EdgeParticle::new(rng, Vec2::new(0.0, y as f32), Vec2::X));
            particles.push(EdgeParticle::new(rng, Vec2::new(w, y as f32), Vec2::X));
        }
        Self { particles }
    }

    pub fn update(&mut self, now: u64) {
        let t = now as f32 / 1000.0;
        for p in &mut self.particles {
            p.pos = p.base + p.axis * (t * p.speed).sin() * p.amplitude;
        }
    }
}

/// Maximum tilt of the game-over card (15 degrees)
pub const GAME_OVER_MAX_ROTATION: f32 = std::f32::consts::PI / 12.0;

/// Fade/zoom/sway of the game-over card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverAnimation {
    pub alpha: f32,
    pub scale: f32,
    pub rotation: f32,
}

impl Default for GameOverAnimation {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            scale: 0.1,
            rotation: 0.0,
        }
    }
}

impl GameOverAnimation {
    /// Advance one frame; `reduced_motion` skips the sway
    pub fn update(&mut self, now: u64, reduced_motion: bool) {
        self.alpha = (self.alpha + 0.03).min(1.0);
        self.scale = (self.scale + 0.04).min(1.0);
        let target = if reduced_motion {
            0.0
        } else {
            (now as f32 / 500.0).sin() * GAME_OVER_MAX_ROTATION
        };
        self.rotation = lerp(self.rotation, target, 0.1);
    }
}

/// Wall glow for one side (0-3), pulsing out of phase around the arena
pub fn wall_pulse(now: u64, side: usize) -> f32 {
    let phase = now as f32 / 1000.0 + side as f32 * std::f32::consts::FRAC_PI_2;
    5.0 + phase.sin() * 3.0
}
