//! Discrete player moves
//!
//! Input arrives as one of four directions. Keyboard and swipe translation live
//! here too so every front end maps gestures the same way.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::COLS;

/// Minimum swipe length (screen pixels) before it counts as a move
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// A single directional move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveIntent {
    /// Forward, one row further from the start
    Up,
    Down,
    Left,
    Right,
}

impl MoveIntent {
    /// Column/row delta for this move
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveIntent::Up => (0, 1),
            MoveIntent::Down => (0, -1),
            MoveIntent::Left => (-1, 0),
            MoveIntent::Right => (1, 0),
        }
    }

    /// Map a DOM-style key name to a move
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(MoveIntent::Up),
            "ArrowDown" => Some(MoveIntent::Down),
            "ArrowLeft" => Some(MoveIntent::Left),
            "ArrowRight" => Some(MoveIntent::Right),
            _ => None,
        }
    }

    /// Classify a swipe from `start` to `end` in screen coordinates (y down).
    ///
    /// The dominant axis wins; swipes shorter than `min_distance` are ignored.
    pub fn from_swipe(start: (f32, f32), end: (f32, f32), min_distance: f32) -> Option<Self> {
        let dx = start.0 - end.0;
        let dy = start.1 - end.1;

        if dx.abs() > dy.abs() {
            if dx.abs() <= min_distance {
                None
            } else if dx > 0.0 {
                Some(MoveIntent::Left)
            } else {
                Some(MoveIntent::Right)
            }
        } else if dy.abs() <= min_distance {
            None
        } else if dy > 0.0 {
            Some(MoveIntent::Up)
        } else {
            Some(MoveIntent::Down)
        }
    }
}

/// Move the player by `(dx, dy)`, clamping to the lane edges and row 0.
///
/// Rows are not limited to the generated window; the window catches up
/// afterwards. Raises the high-water score. Returns `true` if the player
/// actually moved, in which case a `Move` event is queued.
pub fn apply_move(state: &mut GameState, dx: i32, dy: i32) -> bool {
    if state.phase == GamePhase::GameOver {
        return false;
    }

    let prev = state.player;
    let column = (prev.column as i64 + dx as i64).clamp(0, COLS as i64 - 1) as u32;
    let row = (prev.row as i64 + dy as i64).clamp(0, u32::MAX as i64) as u32;

    state.player.column = column;
    state.player.row = row;
    state.score = state.score.max(row);

    let moved = state.player != prev;
    if moved {
        state.events.push(GameEvent::Move);
    }
    moved
}
