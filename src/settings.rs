//! Game settings and preferences
//!
//! Persisted separately from the score ledger in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::Storage;
use crate::sim::mongoose::TRAIL_LENGTH;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => 120,
            QualityPreset::High => 300,
        }
    }

    /// Mongoose trail points drawn
    pub fn trail_length(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 3,
            QualityPreset::High => TRAIL_LENGTH,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Mongoose motion trail
    pub trails: bool,
    /// Particle bursts
    pub particles: bool,
    /// Snake glow, pulsing walls and portal shimmer
    pub glow: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no segment wobble, no card sway)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            trails: true,
            particles: true,
            glow: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "snake_settings";

    /// Effective particle count cap
    pub fn particle_cap(&self) -> usize {
        if self.particles {
            self.quality.max_particles()
        } else {
            0
        }
    }

    /// Effective mongoose trail length
    pub fn trail_length(&self) -> usize {
        if self.trails {
            self.quality.trail_length()
        } else {
            0
        }
    }

    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    pub fn music_gain(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Parse stored settings; malformed data falls back to defaults
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed settings: {}", e);
            Self::default()
        })
    }

    pub fn load_from(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(json) => {
                let settings = Self::from_json(&json);
                log::info!("Loaded settings from storage ({} quality)", settings.quality.as_str());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, storage: &mut dyn Storage) {
        let result = serde_json::to_string(self)
            .map_err(anyhow::Error::from)
            .and_then(|json| storage.set_item(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {:#}", e),
        }
    }
}
