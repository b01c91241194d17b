//! Sound and haptic feedback
//!
//! Procedurally described tones - the backend decides how to synthesize them.
//! Feedback is fire-and-forget: nothing here can touch game state.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player hopped to a new cell
    Jump,
    /// Player hit by a car
    Crash,
    /// Coin picked up
    Coin,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Move => SoundEffect::Jump,
            GameEvent::Crash => SoundEffect::Crash,
            GameEvent::CoinCollected => SoundEffect::Coin,
        }
    }
}

/// Oscillator shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// A single oscillator sweep with an exponential fade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub start_hz: f32,
    /// Frequency reached at the end of the tone (exponential ramp)
    pub end_hz: f32,
    /// Starting gain before volume scaling; fades to 0.01
    pub gain: f32,
    pub duration_secs: f32,
}

impl SoundEffect {
    /// Tone for this effect at full volume
    pub fn tone(self) -> ToneSpec {
        match self {
            // Quick upward chirp
            SoundEffect::Jump => ToneSpec {
                waveform: Waveform::Square,
                start_hz: 150.0,
                end_hz: 600.0,
                gain: 0.1,
                duration_secs: 0.1,
            },
            // Low descending buzz
            SoundEffect::Crash => ToneSpec {
                waveform: Waveform::Sawtooth,
                start_hz: 100.0,
                end_hz: 10.0,
                gain: 0.2,
                duration_secs: 0.3,
            },
            // Bright ping
            SoundEffect::Coin => ToneSpec {
                waveform: Waveform::Sine,
                start_hz: 1000.0,
                end_hz: 2000.0,
                gain: 0.1,
                duration_secs: 0.1,
            },
        }
    }

    /// Vibration pulse length in milliseconds, if any
    pub fn haptic_ms(self) -> Option<u32> {
        match self {
            SoundEffect::Jump => Some(10),
            SoundEffect::Crash => Some(200),
            SoundEffect::Coin => None,
        }
    }
}

/// Output device for tones and vibration
pub trait SoundBackend {
    fn play_tone(&self, tone: ToneSpec);
    fn vibrate(&self, duration_ms: u32);
}

/// Discards everything (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl SoundBackend for NullBackend {
    fn play_tone(&self, _tone: ToneSpec) {}
    fn vibrate(&self, _duration_ms: u32) {}
}

/// Logs each tone at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play_tone(&self, tone: ToneSpec) {
        log::debug!(
            "tone {:?} {}Hz -> {}Hz gain {:.3} for {}s",
            tone.waveform,
            tone.start_hz,
            tone.end_hz,
            tone.gain,
            tone.duration_secs
        );
    }

    fn vibrate(&self, duration_ms: u32) {
        log::debug!("vibrate {}ms", duration_ms);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend = NullBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    haptics: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(NullBackend)
    }
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            haptics: true,
        }
    }

    /// Build a manager honoring the player's settings
    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
        self.haptics = settings.haptics;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect (and its haptic pulse)
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol > 0.0 {
            let mut tone = effect.tone();
            tone.gain *= vol;
            self.backend.play_tone(tone);
        }

        if self.haptics {
            if let Some(ms) = effect.haptic_ms() {
                self.backend.vibrate(ms);
            }
        }
    }

    /// Play feedback for a batch of game events
    pub fn handle_events(&self, events: &[GameEvent]) {
        for &event in events {
            self.play(event.into());
        }
    }
}
