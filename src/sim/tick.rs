//! Per-frame simulation step
//!
//! Cars ride their lane like a conveyor belt: once a car slides fully off one
//! edge it reappears just outside the opposite edge. Coins never move.

use super::lane::{Lane, ObstacleKind};
use super::state::{GamePhase, GameState};
use super::window::LaneWindow;
use crate::consts::LANE_WIDTH;

/// Advance the simulation by `elapsed_ms` of wall time.
///
/// Frozen once the run is over. Returns `true` if any obstacle moved.
pub fn tick(state: &mut GameState, elapsed_ms: f32) -> bool {
    if state.phase == GamePhase::GameOver {
        return false;
    }
    advance_obstacles(&mut state.lanes, elapsed_ms)
}

/// Move every car in the window; leaves the revision alone if nothing moved
pub fn advance_obstacles(window: &mut LaneWindow, elapsed_ms: f32) -> bool {
    if elapsed_ms <= 0.0 {
        return false;
    }

    let mut changed = false;
    for lane in window.iter_mut() {
        changed |= advance_lane(lane, elapsed_ms);
    }
    if changed {
        window.touch();
    }
    changed
}

fn advance_lane(lane: &mut Lane, elapsed_ms: f32) -> bool {
    if lane.speed == 0.0 {
        return false;
    }

    let delta = lane.speed * elapsed_ms;
    let mut moved = false;
    for obs in lane.obstacles.iter_mut().filter(|o| o.kind == ObstacleKind::Car) {
        obs.position = wrap_position(obs.position + delta, obs.width);
        moved = true;
    }
    moved
}

/// Conveyor wraparound for an obstacle of `width` at `position`
#[inline]
pub fn wrap_position(position: f32, width: f32) -> f32 {
    if position > LANE_WIDTH {
        -width
    } else if position < -width {
        LANE_WIDTH
    } else {
        position
    }
}
