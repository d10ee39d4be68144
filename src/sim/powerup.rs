//! Power-up items and the timed buffs they grant

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Position;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Snake moves twice as often
    Speed,
    /// Collisions with self, obstacles and the mongoose are ignored
    Shield,
    /// Mongoose moves at half speed
    Slow,
    /// Food is worth double
    Double,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::Slow,
        PowerUpKind::Double,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Glow color
    pub fn color(self) -> [f32; 3] {
        match self {
            PowerUpKind::Speed => [1.0, 1.0, 0.0],
            PowerUpKind::Shield => [0.0, 1.0, 0.0],
            PowerUpKind::Slow => [0.0, 0.0, 1.0],
            PowerUpKind::Double => [1.0, 0.0, 1.0],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "Speed",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Slow => "Slow",
            PowerUpKind::Double => "Double",
        }
    }

    fn index(self) -> usize {
        match self {
            PowerUpKind::Speed => 0,
            PowerUpKind::Shield => 1,
            PowerUpKind::Slow => 2,
            PowerUpKind::Double => 3,
        }
    }
}

/// A collectible power-up lying on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Position,
    /// Still collectible
    pub active: bool,
    /// Field timestamp after which the item disappears (ms)
    pub expires_at: u64,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Position, now: u64, lifetime_ms: u64) -> Self {
        Self {
            kind,
            pos,
            active: true,
            expires_at: now.saturating_add(lifetime_ms),
        }
    }

    /// Deactivate once the field lifetime has elapsed
    pub fn update(&mut self, now: u64) {
        if now >= self.expires_at {
            self.active = false;
        }
    }
}

/// Buffs currently applied to the snake, each with its own deadline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivePowerUps {
    deadlines: [Option<u64>; 4],
}

impl ActivePowerUps {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.deadlines[kind.index()].is_some()
    }

    pub fn deadline(&self, kind: PowerUpKind) -> Option<u64> {
        self.deadlines[kind.index()]
    }

    /// Activate (or extend) a buff until `until`
    pub fn activate(&mut self, kind: PowerUpKind, until: u64) {
        let slot = &mut self.deadlines[kind.index()];
        *slot = Some(slot.map_or(until, |d| d.max(until)));
    }

    /// Remove every buff whose deadline has passed, returning them
    pub fn expire(&mut self, now: u64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = &mut self.deadlines[kind.index()];
            if slot.is_some_and(|d| now >= d) {
                *slot = None;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn active_kinds(&self) -> impl Iterator<Item = PowerUpKind> + '_ {
        PowerUpKind::ALL.into_iter().filter(|k| self.is_active(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_expire() {
        let mut active = ActivePowerUps::default();
        active.activate(PowerUpKind::Speed, 5000);
        active.activate(PowerUpKind::Double, 7000);
        assert!(active.is_active(PowerUpKind::Speed));
        assert!(!active.is_active(PowerUpKind::Shield));

        assert!(active.expire(4999).is_empty());
        assert_eq!(active.expire(5000), vec![PowerUpKind::Speed]);
        assert!(!active.is_active(PowerUpKind::Speed));
        assert!(active.is_active(PowerUpKind::Double));
        assert_eq!(active.expire(10_000), vec![PowerUpKind::Double]);
        assert_eq!(active.active_kinds().count(), 0);
    }

    #[test]
    fn test_reactivation_extends_deadline() {
        let mut active = ActivePowerUps::default();
        active.activate(PowerUpKind::Shield, 5000);
        active.activate(PowerUpKind::Shield, 8000);
        assert_eq!(active.deadline(PowerUpKind::Shield), Some(8000));
        // An earlier deadline never shortens an active buff
        active.activate(PowerUpKind::Shield, 6000);
        assert_eq!(active.deadline(PowerUpKind::Shield), Some(8000));
    }

    #[test]
    fn test_field_item_lifetime() {
        let mut item = PowerUp::new(PowerUpKind::Slow, Position::new(20, 20), 1000, 10_000);
        item.update(10_999);
        assert!(item.active);
        item.update(11_000);
        assert!(!item.active);
    }
}
