//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects plus one looping music track.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Session lost
    Die,
    /// Power-up collected
    PowerUp,
    /// Score crossed a level threshold
    LevelUp,
}

impl SoundEffect {
    /// Sound cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Ate { .. } => Some(SoundEffect::Eat),
            GameEvent::LevelUp(_) => Some(SoundEffect::LevelUp),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::Die),
            GameEvent::SessionStarted(_)
            | GameEvent::PowerUpExpired(_)
            | GameEvent::MongooseBehavior(_)
            | GameEvent::Quit => None,
        }
    }
}

/// Background track, served next to the page
pub const MUSIC_SRC: &str = "background.mp3";

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{MUSIC_SRC, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        /// Master volume times effects volume
        sfx_gain: f32,
        /// Master volume times music volume
        music_gain: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }
            let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
            match &music {
                Some(track) => track.set_loop(true),
                None => log::warn!("Failed to create music element - music disabled"),
            }
            Self {
                ctx,
                music,
                sfx_gain: 0.8,
                music_gain: 0.4,
                muted: false,
            }
        }

        /// Pick up volumes from the user settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_gain = settings.sfx_gain();
            self.music_gain = settings.music_gain();
            self.update_music_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.update_music_volume();
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.sfx_gain }
        }

        fn update_music_volume(&self) {
            if let Some(track) = &self.music {
                let vol = if self.muted { 0.0 } else { self.music_gain };
                track.set_volume(vol as f64);
            }
        }

        /// Start the background track from the top
        pub fn start_music(&self) {
            let Some(track) = &self.music else { return };
            track.set_current_time(0.0);
            self.update_music_volume();
            // Autoplay may be refused until the first user gesture
            if let Err(e) = track.play() {
                log::debug!("Music playback refused: {:?}", e);
            }
        }

        pub fn stop_music(&self) {
            if let Some(track) = &self.music {
                let _ = track.pause();
                track.set_current_time(0.0);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Eat => self.play_eat(ctx, vol),
                SoundEffect::Die => self.play_die(ctx, vol),
                SoundEffect::PowerUp => self.play_power_up(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short rising chirp
        fn play_eat(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(440.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(880.0, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Descending buzz
        fn play_die(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 300.0, 200.0, 120.0].iter().enumerate() {
                let delay = i as f64 * 0.15;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sawtooth) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }

        /// Quick three-note arpeggio
        fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Short fanfare
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameMode, LossCause, PowerUpKind};

    #[test]
    fn test_event_cues() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Ate { points: 10, score: 10 }),
            Some(SoundEffect::Eat)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                cause: LossCause::OutOfBounds,
                score: 0,
                rank: None,
            }),
            Some(SoundEffect::Die)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected(PowerUpKind::Slow)),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::LevelUp(2)), Some(SoundEffect::LevelUp));
        assert_eq!(SoundEffect::for_event(&GameEvent::SessionStarted(GameMode::Unbounded)), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::PowerUpExpired(PowerUpKind::Speed)), None);
    }
}
