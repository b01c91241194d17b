//! Game state and the per-event pipelines
//!
//! All mutation goes through two entry points:
//! - `handle_intent`: move → window update → collision check
//! - `advance_frame`: obstacle motion → collision check
//!
//! The order is fixed; the collision pass must see the window that matches
//! the player's new row.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionResult, resolve_collisions};
use super::intent::{MoveIntent, apply_move};
use super::lane::Lane;
use super::tick::tick;
use super::window::LaneWindow;
use crate::consts::START_COLUMN;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player can move, cars are moving
    Playing,
    /// Hit by a car; frozen until reset
    GameOver,
}

/// Feedback events for audio/haptics (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player changed column or row
    Move,
    /// Player was hit by a car
    Crash,
    /// Player picked up a coin
    CoinCollected,
}

/// Player position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Column in `[0, COLS)`
    pub column: u32,
    /// Absolute row index
    pub row: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            column: START_COLUMN,
            row: 0,
        }
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed; lane layouts are a pure function of seed and row
    pub seed: u64,
    /// Generator balance
    pub tuning: Tuning,
    pub player: Player,
    /// Materialized lanes around the player
    pub lanes: LaneWindow,
    /// Highest row reached this run
    pub score: u32,
    /// Coins collected this run
    pub coins: u32,
    pub phase: GamePhase,
    /// Pending feedback events, drained by the front end
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new run with custom generator tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("Starting run with seed {}", seed);
        let mut state = Self {
            seed,
            tuning,
            player: Player::default(),
            lanes: LaneWindow::new(),
            score: 0,
            coins: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
        };
        state.sync_window();
        state
    }

    /// Start over with a new seed, keeping the tuning
    pub fn reset(&mut self, seed: u64) {
        *self = Self::with_tuning(seed, self.tuning.clone());
    }

    /// Start over on the same seed
    pub fn restart(&mut self) {
        self.reset(self.seed);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Lane under the player, if generated yet
    pub fn current_lane(&self) -> Option<&Lane> {
        self.lanes.get(self.player.row)
    }

    /// Make sure lanes exist around the player. Returns `true` if the window changed.
    pub fn sync_window(&mut self) -> bool {
        self.lanes.ensure(self.player.row, self.seed, &self.tuning)
    }

    /// Run a move through the full pipeline: move, window, collisions.
    ///
    /// Returns `true` if the player moved.
    pub fn handle_intent(&mut self, intent: MoveIntent) -> bool {
        let (dx, dy) = intent.delta();
        self.apply_delta(dx, dy)
    }

    /// Same as `handle_intent` for a raw delta
    pub fn apply_delta(&mut self, dx: i32, dy: i32) -> bool {
        let prev_row = self.player.row;
        if !apply_move(self, dx, dy) {
            return false;
        }
        if self.player.row != prev_row {
            self.sync_window();
        }
        resolve_collisions(self);
        true
    }

    /// Advance obstacles by `elapsed_ms` and re-check the player's lane.
    ///
    /// Does nothing once the run is over.
    pub fn advance_frame(&mut self, elapsed_ms: f32) -> CollisionResult {
        if tick(self, elapsed_ms) {
            resolve_collisions(self)
        } else {
            CollisionResult::none()
        }
    }

    /// Take all pending feedback events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
