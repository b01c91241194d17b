//! Frame timing and loop cancellation
//!
//! The host calls `FrameLoop::on_frame` from its refresh callback (e.g.
//! `requestAnimationFrame`) with a monotonic timestamp in milliseconds. The
//! loop stops touching the game the moment its token is cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::{CollisionResult, GameState};

/// Turns successive timestamps into elapsed time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now_ms`; returns time since the previous call (none on the first)
    pub fn delta(&mut self, now_ms: f64) -> Option<f32> {
        let elapsed = self.last_time.map(|last| (now_ms - last).max(0.0) as f32);
        self.last_time = Some(now_ms);
        elapsed
    }

    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

/// Shared stop flag for a frame loop
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

/// Per-frame driver for one run
#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: FrameClock,
    token: CancelToken,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to stop this loop from elsewhere
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Advance `state` by the time since the last frame
    pub fn on_frame(&mut self, now_ms: f64, state: &mut GameState) -> (FrameStatus, CollisionResult) {
        if self.token.is_cancelled() {
            return (FrameStatus::Stopped, CollisionResult::none());
        }

        let result = match self.clock.delta(now_ms) {
            Some(elapsed_ms) => state.advance_frame(elapsed_ms),
            None => CollisionResult::none(),
        };
        (FrameStatus::Continue, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Lane, LaneKind, Obstacle};

    fn moving_state() -> GameState {
        let mut state = GameState::new(11);
        for lane in state.lanes.iter_mut() {
            lane.speed = 0.0;
        }
        if let Some(lane) = state.lanes.get_mut(1) {
            *lane = Lane {
                row: 1,
                kind: LaneKind::Road,
                speed: 0.01,
                obstacles: vec![Obstacle::car(0.0, 15.0)],
            };
        }
        state
    }

    fn car_position(state: &GameState) -> f32 {
        state.lanes.get(1).unwrap().obstacles[0].position
    }

    #[test]
    fn test_first_frame_has_no_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), None);
        assert_eq!(clock.delta(1016.0), Some(16.0));
        assert_eq!(clock.delta(1010.0), Some(0.0));
        clock.reset();
        assert_eq!(clock.delta(5.0), None);
    }

    #[test]
    fn test_loop_advances_cars() {
        let mut state = moving_state();
        let mut frames = FrameLoop::new();
        frames.on_frame(0.0, &mut state);
        assert_eq!(car_position(&state), 0.0);

        let (status, _) = frames.on_frame(100.0, &mut state);
        assert_eq!(status, FrameStatus::Continue);
        assert!((car_position(&state) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_cancelled_loop_is_inert() {
        let mut state = moving_state();
        let mut frames = FrameLoop::new();
        let token = frames.token();
        frames.on_frame(0.0, &mut state);

        token.cancel();
        assert!(frames.is_cancelled());
        let (status, _) = frames.on_frame(500.0, &mut state);
        assert_eq!(status, FrameStatus::Stopped);
        assert_eq!(car_position(&state), 0.0);
    }
}
