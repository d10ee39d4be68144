//! High score leaderboard system
//!
//! Persisted as a plain JSON array under a fixed key, tracks top 5 scores.

use serde::{Deserialize, Serialize};

use crate::platform::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub scores: Vec<u32>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "snakeHighScores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.scores.last().is_none_or(|&lowest| score > lowest)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // Ties go after existing equal scores
        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        self.scores.insert(pos, score);
        self.scores.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Parse a stored ledger; anything malformed counts as no scores
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.scores.sort_unstable_by(|a, b| b.cmp(a));
                scores.scores.truncate(MAX_HIGH_SCORES);
                scores
            }
            Err(e) => {
                log::warn!("Ignoring malformed high scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn load_from(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(json) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.scores.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save_to(&self, storage: &mut dyn Storage) {
        let result = serde_json::to_string(self)
            .map_err(anyhow::Error::from)
            .and_then(|json| storage.set_item(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("High scores saved ({} entries)", self.scores.len()),
            Err(e) => log::warn!("Failed to save high scores: {:#}", e),
        }
    }
}
