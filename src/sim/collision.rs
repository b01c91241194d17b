//! Player vs lane interactions
//!
//! Everything is a 1D interval test along the lane: the player occupies its
//! column shrunk by a small inset, obstacles occupy `[position, position + width]`.

use super::lane::{Lane, ObstacleKind};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{COL_WIDTH, PLAYER_INSET};
use crate::intervals_overlap;

/// What a collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// A car hit the player; the run is over
    pub crashed: bool,
    /// A coin was picked up and removed from the lane
    pub coin_collected: bool,
}

impl CollisionResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.crashed || self.coin_collected
    }
}

/// Horizontal hit box `(left, right)` of a player standing in `column`
#[inline]
pub fn player_interval(column: u32) -> (f32, f32) {
    let left = column as f32 * COL_WIDTH + PLAYER_INSET;
    let right = (column + 1) as f32 * COL_WIDTH - PLAYER_INSET;
    (left, right)
}

/// Whether any car in `lane` overlaps `[left, right]`
pub fn car_hit(lane: &Lane, left: f32, right: f32) -> bool {
    lane.obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Car)
        .any(|o| intervals_overlap(left, right, o.left(), o.right()))
}

/// Index of the first coin in `lane` overlapping `[left, right]`
pub fn coin_hit(lane: &Lane, left: f32, right: f32) -> Option<usize> {
    lane.obstacles
        .iter()
        .position(|o| o.kind == ObstacleKind::Coin && intervals_overlap(left, right, o.left(), o.right()))
}

/// Check the player against the lane they are standing on.
///
/// Grass lanes and rows not yet generated are ignored. A crash and a coin
/// pickup can both land in the same pass; at most one coin is taken per pass.
pub fn resolve_collisions(state: &mut GameState) -> CollisionResult {
    if state.phase == GamePhase::GameOver {
        return CollisionResult::none();
    }

    let row = state.player.row;
    let (left, right) = player_interval(state.player.column);

    let (crashed, coin_index) = match state.lanes.get(row) {
        Some(lane) if lane.is_road() => (car_hit(lane, left, right), coin_hit(lane, left, right)),
        _ => return CollisionResult::none(),
    };

    let mut result = CollisionResult::none();

    if let (Some(index), Some(lane)) = (coin_index, state.lanes.get_mut(row)) {
        lane.obstacles.remove(index);
        state.lanes.touch();
        state.coins += 1;
        state.events.push(GameEvent::CoinCollected);
        result.coin_collected = true;
        log::debug!("Coin collected on row {} ({} total)", row, state.coins);
    }

    if crashed {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Crash);
        result.crashed = true;
        log::info!(
            "Crashed on row {} - score {}, coins {}",
            row,
            state.score,
            state.coins
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lane::{Lane, LaneKind, Obstacle};
    use crate::sim::state::Player;

    fn road(row: u32, obstacles: Vec<Obstacle>) -> Lane {
        Lane {
            row,
            kind: LaneKind::Road,
            speed: 0.02,
            obstacles,
        }
    }

    fn state_on(lane: Lane, column: u32) -> GameState {
        let mut state = GameState::new(1);
        let row = lane.row;
        state.player = Player { column, row };
        state.lanes.ensure(row, state.seed, &state.tuning);
        if let Some(slot) = state.lanes.get_mut(row) {
            *slot = lane;
        }
        state.events.clear();
        state
    }

    #[test]
    fn test_player_interval_is_inset() {
        let (left, right) = player_interval(5);
        assert!((left - (5.0 * COL_WIDTH + 2.0)).abs() < 1e-4);
        assert!((right - (6.0 * COL_WIDTH - 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_car_over_column_crashes() {
        // Column 5 spans ~45.45..54.55, car spans 40..55
        let mut state = state_on(road(4, vec![Obstacle::car(40.0, 15.0)]), 5);
        let result = resolve_collisions(&mut state);
        assert!(result.crashed);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events, vec![GameEvent::Crash]);
    }

    #[test]
    fn test_car_elsewhere_is_safe() {
        let mut state = state_on(road(4, vec![Obstacle::car(40.0, 15.0)]), 0);
        let result = resolve_collisions(&mut state);
        assert!(!result.any());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_inset_forgives_edge_contact() {
        // Car ends 1% into column 1, inside the 2% inset
        let car_right = COL_WIDTH + 1.0;
        let mut state = state_on(road(4, vec![Obstacle::car(car_right - 15.0, 15.0)]), 1);
        assert!(!resolve_collisions(&mut state).crashed);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = state_on(road(4, vec![Obstacle::coin(47.0, 5.0)]), 5);
        let revision = state.lanes.revision();

        let result = resolve_collisions(&mut state);
        assert!(result.coin_collected);
        assert_eq!(state.coins, 1);
        assert!(state.lanes.get(4).unwrap().obstacles.is_empty());
        assert_ne!(state.lanes.revision(), revision);

        let result = resolve_collisions(&mut state);
        assert!(!result.coin_collected);
        assert_eq!(state.coins, 1);
    }

    #[test]
    fn test_one_coin_per_pass() {
        let mut state = state_on(
            road(4, vec![Obstacle::coin(46.0, 5.0), Obstacle::coin(50.0, 5.0)]),
            5,
        );
        resolve_collisions(&mut state);
        assert_eq!(state.coins, 1);
        let lane = state.lanes.get(4).unwrap();
        assert_eq!(lane.obstacles, vec![Obstacle::coin(50.0, 5.0)]);

        resolve_collisions(&mut state);
        assert_eq!(state.coins, 2);
        assert!(state.lanes.get(4).unwrap().obstacles.is_empty());
    }

    #[test]
    fn test_crash_and_coin_in_same_pass() {
        let mut state = state_on(
            road(4, vec![Obstacle::car(44.0, 15.0), Obstacle::coin(50.0, 5.0)]),
            5,
        );
        let result = resolve_collisions(&mut state);
        assert!(result.crashed && result.coin_collected);
        assert_eq!(state.coins, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_grass_never_interacts() {
        let mut grass = Lane::grass(5);
        grass.obstacles.push(Obstacle::car(0.0, 100.0));
        let mut state = state_on(grass, 5);
        assert!(!resolve_collisions(&mut state).any());
    }

    #[test]
    fn test_missing_lane_is_noop() {
        let mut state = GameState::new(1);
        state.player.row = 900;
        assert!(!resolve_collisions(&mut state).any());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_no_interaction_after_game_over() {
        let mut state = state_on(road(4, vec![Obstacle::coin(47.0, 5.0)]), 5);
        state.phase = GamePhase::GameOver;
        assert!(!resolve_collisions(&mut state).any());
        assert_eq!(state.coins, 0);
    }
}
