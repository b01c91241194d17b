//! A running game: state, frame loop and feedback wired together
//!
//! Input handlers and the frame callback both run on the host's single UI
//! thread, so everything here takes `&mut self` and finishes before returning.

use super::time::{CancelToken, FrameLoop, FrameStatus};
use crate::audio::{AudioManager, NullBackend, SoundBackend};
use crate::settings::Settings;
use crate::sim::{GameState, MIN_SWIPE_DISTANCE, MoveIntent};
use crate::tuning::Tuning;
use crate::view::FrameView;

/// Game instance holding all state
pub struct Session<B: SoundBackend = NullBackend> {
    state: GameState,
    frames: FrameLoop,
    audio: AudioManager<B>,
    settings: Settings,
    was_over: bool,
}

impl Session {
    /// Silent session with default tuning and settings
    pub fn headless(seed: u64) -> Self {
        Self::new(seed, Tuning::default(), Settings::default(), NullBackend)
    }
}

impl<B: SoundBackend> Session<B> {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, backend: B) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            frames: FrameLoop::new(),
            audio: AudioManager::with_settings(backend, &settings),
            settings,
            was_over: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }

    /// Cancellation handle for the current frame loop
    pub fn frame_token(&self) -> CancelToken {
        self.frames.token()
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    /// Apply a move and play its feedback
    pub fn handle_intent(&mut self, intent: MoveIntent) -> bool {
        let moved = self.state.handle_intent(intent);
        self.flush_feedback();
        moved
    }

    /// Keyboard entry point; unknown keys are ignored
    pub fn handle_key(&mut self, key: &str) -> bool {
        MoveIntent::from_key(key).is_some_and(|intent| self.handle_intent(intent))
    }

    /// Touch entry point; short swipes are ignored
    pub fn handle_swipe(&mut self, start: (f32, f32), end: (f32, f32)) -> bool {
        MoveIntent::from_swipe(start, end, MIN_SWIPE_DISTANCE)
            .is_some_and(|intent| self.handle_intent(intent))
    }

    /// Frame callback from the host
    pub fn on_frame(&mut self, now_ms: f64) -> FrameStatus {
        let (status, _) = self.frames.on_frame(now_ms, &mut self.state);
        self.flush_feedback();
        status
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> FrameView {
        FrameView::project(&self.state, self.settings.night_mode)
    }

    /// Throw away the current run and start a fresh one.
    ///
    /// The old frame loop is cancelled; callers observe either the old run or
    /// the new one, never a mix.
    pub fn reset(&mut self, seed: u64) {
        self.frames.cancel();
        self.state.reset(seed);
        self.frames = FrameLoop::new();
        self.was_over = false;
    }

    /// Start over on the current seed
    pub fn restart(&mut self) {
        let seed = self.state.seed;
        self.reset(seed);
    }

    /// Stop the frame loop for good
    pub fn shutdown(&mut self) {
        self.frames.cancel();
        log::info!(
            "Session ended - score {}, coins {}",
            self.state.score,
            self.state.coins
        );
    }

    fn flush_feedback(&mut self) {
        let events = self.state.drain_events();
        self.audio.handle_events(&events);

        if self.state.is_over() && !self.was_over {
            log::info!(
                "Game over at row {} - score {}, coins {}",
                self.state.player.row,
                self.state.score,
                self.state.coins
            );
        }
        self.was_over = self.state.is_over();
    }
}
