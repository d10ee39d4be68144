//! Top-level game state
//!
//! Owns the phase machine, the menu, the score ledger and the current
//! session. Key presses land here between frames; `tick` advances the rest.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::LossCause;
use super::geom::Playfield;
use super::mode::GameMode;
use super::mongoose::Behavior;
use super::powerup::PowerUpKind;
use super::session::Session;
use crate::highscores::HighScores;
use crate::platform::Key;
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::ui::{Menu, MenuSelection};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu or mode selector
    #[default]
    Menu,
    /// Active session
    Playing,
    /// Leaderboard screen
    HighScores,
    /// Session ended, frozen in the background
    GameOver,
}

/// Things that happened during input handling or a tick
///
/// Drained by the frontend each frame to drive audio and the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted(GameMode),
    Ate { points: u32, score: u32 },
    LevelUp(u32),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    MongooseBehavior(Behavior),
    GameOver {
        cause: LossCause,
        score: u32,
        /// 1-based ledger rank, if the score made it in
        rank: Option<usize>,
    },
    Quit,
}

/// Outcome of the last finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub mode: GameMode,
    pub cause: LossCause,
    pub score: u32,
    pub rank: Option<usize>,
}

pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub menu: Menu,
    /// Mode of the current or most recent session
    pub mode: GameMode,
    pub session: Option<Session>,
    pub high_scores: HighScores,
    /// Playfield used for the next session
    pub field: Playfield,
    pub tuning: Tuning,
    /// Particle budget from settings (0 disables bursts)
    pub particle_cap: usize,
    pub reduced_motion: bool,
    pub last_result: Option<GameResult>,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, field: Playfield, tuning: Tuning, high_scores: HighScores) -> Self {
        let defaults = Settings::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            menu: Menu::new(),
            mode: GameMode::default(),
            session: None,
            high_scores,
            field,
            tuning,
            particle_cap: defaults.particle_cap(),
            reduced_motion: defaults.reduced_motion,
            last_result: None,
            events: Vec::new(),
        }
    }

    /// Pick up the simulation-relevant parts of the user settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.particle_cap = settings.particle_cap();
        self.reduced_motion = settings.reduced_motion;
    }

    /// Route a key press to the active phase
    pub fn handle_key(&mut self, key: Key, now: u64) {
        match self.phase {
            GamePhase::Menu => match self.menu.handle_input(key) {
                Some(MenuSelection::Mode(mode)) => self.start_session(mode, now),
                Some(MenuSelection::HighScores) => self.phase = GamePhase::HighScores,
                Some(MenuSelection::Quit) => {
                    log::info!("Quit selected; nothing to close in a browser tab");
                    self.events.push(GameEvent::Quit);
                }
                None => {}
            },
            GamePhase::Playing => {
                if let (Some(dir), Some(session)) = (key.direction(), self.session.as_mut()) {
                    session.snake.set_direction(dir);
                }
            }
            GamePhase::HighScores => {
                if key == Key::Escape {
                    self.phase = GamePhase::Menu;
                }
            }
            GamePhase::GameOver => match key {
                Key::Enter => self.start_session(self.mode, now),
                Key::Escape => self.return_to_menu(),
                _ => {}
            },
        }
    }

    /// Throw away any running session and start a fresh one
    pub fn start_session(&mut self, mode: GameMode, now: u64) {
        log::info!("Starting {} session (seed {})", mode, self.seed);
        self.mode = mode;
        self.session = Some(Session::new(mode, self.field, now, &mut self.rng, &self.tuning));
        self.last_result = None;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionStarted(mode));
    }

    pub fn return_to_menu(&mut self) {
        self.session = None;
        self.menu.reset();
        self.phase = GamePhase::Menu;
    }

    /// Freeze the session and record its score
    pub fn end_session(&mut self, cause: LossCause) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let score = session.score;
        let rank = self.high_scores.add_score(score);
        log::info!(
            "Game over in {}: {} with score {}{}",
            self.mode,
            cause.as_str(),
            score,
            rank.map(|r| format!(" (rank {})", r)).unwrap_or_default()
        );

        self.phase = GamePhase::GameOver;
        self.last_result = Some(GameResult {
            mode: self.mode,
            cause,
            score,
            rank,
        });
        self.events.push(GameEvent::GameOver { cause, score, rank });
    }

    /// Score of the running (or frozen) session
    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, Playfield::default(), Tuning::default(), HighScores::new())
    }

    #[test]
    fn test_menu_to_session() {
        let mut s = state();
        s.handle_key(Key::Enter, 0);
        s.handle_key(Key::Down, 0);
        assert_eq!(s.phase, GamePhase::Menu);
        s.handle_key(Key::Enter, 0);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.mode, GameMode::Unbounded);
        assert!(s.session.as_ref().unwrap().portal.is_some());
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::SessionStarted(GameMode::Unbounded)]
        );
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_high_scores_screen_round_trip() {
        let mut s = state();
        s.handle_key(Key::Down, 0);
        s.handle_key(Key::Enter, 0);
        assert_eq!(s.phase, GamePhase::HighScores);
        s.handle_key(Key::Enter, 0);
        assert_eq!(s.phase, GamePhase::HighScores);
        s.handle_key(Key::Escape, 0);
        assert_eq!(s.phase, GamePhase::Menu);
    }

    #[test]
    fn test_quit_is_ignored() {
        let mut s = state();
        s.handle_key(Key::Up, 0);
        s.handle_key(Key::Enter, 0);
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.drain_events(), vec![GameEvent::Quit]);
    }

    #[test]
    fn test_arrows_steer_while_playing() {
        let mut s = state();
        s.start_session(GameMode::PrisonYard, 0);
        s.handle_key(Key::Left, 0);
        assert_eq!(s.session.as_ref().unwrap().snake.direction, crate::sim::Direction::Right);
        s.handle_key(Key::Up, 0);
        assert_eq!(s.session.as_ref().unwrap().snake.direction, crate::sim::Direction::Up);
        // Enter does nothing mid-game
        s.handle_key(Key::Enter, 0);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_restart_and_exit() {
        let mut s = state();
        s.start_session(GameMode::ObstacleCourse, 0);
        s.session.as_mut().unwrap().score = 70;
        s.end_session(LossCause::Obstacle);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.high_scores.scores, vec![70]);
        assert_eq!(s.last_result.unwrap().rank, Some(1));

        s.handle_key(Key::Enter, 500);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.mode, GameMode::ObstacleCourse);
        assert_eq!(s.score(), 0);
        assert_eq!(s.session.as_ref().unwrap().snake.last_move, 500);

        s.end_session(LossCause::OutOfBounds);
        s.handle_key(Key::Escape, 600);
        assert_eq!(s.phase, GamePhase::Menu);
        assert!(s.session.is_none());
        // Dying before eating still leaves an entry
        assert_eq!(s.high_scores.scores, vec![70, 0]);
    }

    #[test]
    fn test_settings_control_particle_budget() {
        let mut s = state();
        let settings = Settings {
            particles: false,
            reduced_motion: true,
            ..Settings::default()
        };
        s.apply_settings(&settings);
        assert_eq!(s.particle_cap, 0);
        assert!(s.reduced_motion);
    }
}
