//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Lane layouts depend only on run seed and row
//! - Time enters only through `advance_frame`'s elapsed milliseconds
//! - Stable iteration order (lanes by row)
//! - No rendering or platform dependencies

pub mod collision;
pub mod intent;
pub mod lane;
pub mod state;
pub mod tick;
pub mod window;

pub use collision::{CollisionResult, player_interval, resolve_collisions};
pub use intent::{MIN_SWIPE_DISTANCE, MoveIntent, apply_move};
pub use lane::{Lane, LaneKind, Obstacle, ObstacleKind, generate_lane, is_rest_row};
pub use state::{GameEvent, GamePhase, GameState, Player};
pub use tick::{advance_obstacles, tick};
pub use window::{LaneWindow, eviction_floor, visible_start, window_range};
