//! Lane Hopper - An endless lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, window, collisions, game state)
//! - `view`: Read-only projection handed to the renderer
//! - `platform`: Frame driver with cancellation
//! - `audio`: Sound/haptic feedback seam
//! - `tuning`: Data-driven lane generation balance

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of columns across a lane (odd so the player starts centered)
    pub const COLS: u32 = 11;
    /// Player starting column
    pub const START_COLUMN: u32 = COLS / 2;

    /// Lane width in percent; all horizontal positions use this unit
    pub const LANE_WIDTH: f32 = 100.0;
    /// Width of a single column (percent of lane width)
    pub const COL_WIDTH: f32 = LANE_WIDTH / COLS as f32;
    /// Hit box inset on each side of the player's column
    pub const PLAYER_INSET: f32 = 2.0;

    /// Rows shown on screen at once
    pub const VISIBLE_ROWS: u32 = 15;
    /// Height of a row on screen (percent of viewport height)
    pub const ROW_HEIGHT: f32 = 100.0 / VISIBLE_ROWS as f32;
    /// Player stays this many rows above the bottom once the camera scrolls
    pub const CAMERA_OFFSET_ROWS: u32 = 3;
    /// Extra rows generated ahead of the visible band
    pub const GENERATION_MARGIN: u32 = 5;
    /// Rows kept below the visible band before eviction
    pub const EVICTION_MARGIN: u32 = 5;
}

/// Open interval overlap test: touching edges do not count.
#[inline]
pub fn intervals_overlap(a_left: f32, a_right: f32, b_left: f32, b_right: f32) -> bool {
    a_left < b_right && a_right > b_left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_overlap_is_open() {
        assert!(intervals_overlap(0.0, 10.0, 5.0, 15.0));
        assert!(!intervals_overlap(0.0, 10.0, 10.0, 20.0));
        assert!(!intervals_overlap(20.0, 30.0, 0.0, 20.0));
        assert!(intervals_overlap(0.0, 100.0, 40.0, 41.0));
    }
}
