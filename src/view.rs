//! Read-only projection of the game for the renderer
//!
//! Lanes are anchored to the bottom of the viewport with one row of overdraw
//! on each side so rows can slide in and out smoothly. All sizes are percent
//! of the viewport.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{CAMERA_OFFSET_ROWS, COL_WIDTH, ROW_HEIGHT, VISIBLE_ROWS};
use crate::sim::{GameState, LaneKind, Obstacle, visible_start};

/// Points shown per row climbed
pub const SCORE_PER_ROW: u32 = 10;

/// A lane as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneView {
    pub row: u32,
    pub kind: LaneKind,
    pub obstacles: Vec<Obstacle>,
    /// Distance from the viewport bottom (may be negative for overdraw)
    pub bottom: f32,
    pub height: f32,
}

/// The player sprite placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    /// (left, bottom) corner
    pub pos: Vec2,
    /// (width, height)
    pub size: Vec2,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudView {
    pub score: u32,
    pub coins: u32,
    pub game_over: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub lanes: Vec<LaneView>,
    pub player: PlayerView,
    pub hud: HudView,
    pub night_mode: bool,
}

impl FrameView {
    pub fn project(state: &GameState, night_mode: bool) -> Self {
        let start = visible_start(state.player.row);
        let first = start.saturating_sub(1);
        let end = start + VISIBLE_ROWS + 1;

        let lanes = state
            .lanes
            .range(first..end)
            .map(|lane| LaneView {
                row: lane.row,
                kind: lane.kind,
                obstacles: lane.obstacles.clone(),
                bottom: (lane.row as f32 - start as f32) * ROW_HEIGHT,
                height: ROW_HEIGHT,
            })
            .collect();

        // Camera stays put for the first few rows, then the player is pinned
        let screen_row = state.player.row.min(CAMERA_OFFSET_ROWS);
        let player = PlayerView {
            pos: Vec2::new(
                state.player.column as f32 * COL_WIDTH,
                screen_row as f32 * ROW_HEIGHT,
            ),
            size: Vec2::new(COL_WIDTH, ROW_HEIGHT),
        };

        let hud = HudView {
            score: state.score.saturating_mul(SCORE_PER_ROW),
            coins: state.coins,
            game_over: state.is_over(),
        };

        Self {
            lanes,
            player,
            hud,
            night_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::MoveIntent;
    use crate::tuning::Tuning;

    fn quiet_state() -> GameState {
        GameState::with_tuning(
            3,
            Tuning {
                min_cars: 0,
                max_cars: 0,
                coin_chance: 0.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_start_view() {
        let state = quiet_state();
        let view = FrameView::project(&state, false);
        // Rows 0..16 are visible (no row -1 to overdraw)
        assert_eq!(view.lanes.len(), (VISIBLE_ROWS + 1) as usize);
        assert_eq!(view.lanes[0].row, 0);
        assert_eq!(view.lanes[0].bottom, 0.0);
        assert_eq!(view.player.pos.y, 0.0);
        assert_eq!(view.hud, HudView { score: 0, coins: 0, game_over: false });
    }

    #[test]
    fn test_player_pinned_after_scrolling() {
        let mut state = quiet_state();
        for _ in 0..2 {
            state.handle_intent(MoveIntent::Up);
        }
        let view = FrameView::project(&state, true);
        assert!((view.player.pos.y - 2.0 * ROW_HEIGHT).abs() < 1e-4);

        for _ in 0..8 {
            state.handle_intent(MoveIntent::Up);
        }
        let view = FrameView::project(&state, true);
        assert!((view.player.pos.y - CAMERA_OFFSET_ROWS as f32 * ROW_HEIGHT).abs() < 1e-4);
        assert_eq!(view.hud.score, 100);
        assert!(view.night_mode);

        // Visible start is row 7; one row of overdraw below it
        assert_eq!(view.lanes.first().map(|l| l.row), Some(6));
        assert!((view.lanes[0].bottom + ROW_HEIGHT).abs() < 1e-4);
        assert_eq!(view.lanes.len(), (VISIBLE_ROWS + 2) as usize);
    }
}
