//! Sliding window of materialized lanes around the player
//!
//! Lanes are created ahead of the player and evicted once they fall far enough
//! behind. The window is an ordered map keyed by row, so eviction is a single
//! split and lookups past the generated edge are a plain `None`.
//!
//! Every mutation bumps `revision`. Callers compare revisions to skip
//! downstream work when nothing changed.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::lane::{Lane, generate_lane};
use crate::consts::{CAMERA_OFFSET_ROWS, EVICTION_MARGIN, GENERATION_MARGIN, VISIBLE_ROWS};
use crate::tuning::Tuning;

/// First row of the visible band for a player at `player_row`
#[inline]
pub fn visible_start(player_row: u32) -> u32 {
    player_row.saturating_sub(CAMERA_OFFSET_ROWS)
}

/// Rows that must be materialized for a player at `player_row`
pub fn window_range(player_row: u32) -> Range<u32> {
    let start = visible_start(player_row);
    start..start + VISIBLE_ROWS + GENERATION_MARGIN
}

/// Rows strictly below this are evicted
#[inline]
pub fn eviction_floor(player_row: u32) -> u32 {
    visible_start(player_row).saturating_sub(EVICTION_MARGIN)
}

/// Materialized lanes keyed by row index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaneWindow {
    lanes: BTreeMap<u32, Lane>,
    /// Bumped on every change to the set of lanes or their contents
    revision: u64,
}

impl LaneWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn get(&self, row: u32) -> Option<&Lane> {
        self.lanes.get(&row)
    }

    pub fn get_mut(&mut self, row: u32) -> Option<&mut Lane> {
        self.lanes.get_mut(&row)
    }

    pub fn contains(&self, row: u32) -> bool {
        self.lanes.contains_key(&row)
    }

    /// Lanes in ascending row order
    pub fn iter(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Lane> {
        self.lanes.values_mut()
    }

    /// Lanes whose rows fall inside `rows`
    pub fn range(&self, rows: Range<u32>) -> impl Iterator<Item = &Lane> {
        self.lanes.range(rows).map(|(_, lane)| lane)
    }

    /// Mark the window as changed
    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Generate missing lanes around `player_row` and evict the stale tail.
    ///
    /// Returns `true` if any lane was added or removed; otherwise the window
    /// and its revision are untouched.
    pub fn ensure(&mut self, player_row: u32, seed: u64, tuning: &Tuning) -> bool {
        let mut created = 0usize;
        for row in window_range(player_row) {
            if !self.lanes.contains_key(&row) {
                self.lanes.insert(row, generate_lane(row, seed, tuning));
                created += 1;
            }
        }

        let floor = eviction_floor(player_row);
        let kept = self.lanes.split_off(&floor);
        let evicted = std::mem::replace(&mut self.lanes, kept).len();

        let changed = created > 0 || evicted > 0;
        if changed {
            log::debug!(
                "Window at row {}: +{} lanes, -{} lanes ({} live)",
                player_row,
                created,
                evicted,
                self.lanes.len()
            );
            self.touch();
        }
        changed
    }

    pub fn clear(&mut self) {
        if !self.lanes.is_empty() {
            self.lanes.clear();
            self.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_window_bounds(window: &LaneWindow, player_row: u32) {
        for row in window_range(player_row) {
            assert!(window.contains(row), "row {} missing for player at {}", row, player_row);
        }
        let floor = eviction_floor(player_row);
        assert!(window.iter().all(|lane| lane.row >= floor));
    }

    #[test]
    fn test_fresh_window_covers_start() {
        let mut window = LaneWindow::new();
        assert!(window.ensure(0, 1, &Tuning::default()));
        assert_eq!(window.len(), (VISIBLE_ROWS + GENERATION_MARGIN) as usize);
        assert_window_bounds(&window, 0);
        assert!(window.get(0).is_some_and(|lane| !lane.is_road()));
    }

    #[test]
    fn test_second_call_is_noop() {
        let tuning = Tuning::default();
        let mut window = LaneWindow::new();
        window.ensure(12, 1, &tuning);
        let revision = window.revision();
        let snapshot: Vec<Lane> = window.iter().cloned().collect();

        assert!(!window.ensure(12, 1, &tuning));
        assert_eq!(window.revision(), revision);
        assert_eq!(window.iter().cloned().collect::<Vec<_>>(), snapshot);
    }

    #[test]
    fn test_advancing_evicts_behind() {
        let tuning = Tuning::default();
        let mut window = LaneWindow::new();
        window.ensure(0, 1, &tuning);
        window.ensure(25, 1, &tuning);
        window.ensure(30, 1, &tuning);
        assert_window_bounds(&window, 30);
        // visible start 27, floor 22; rows 22..27 were generated at row 25
        assert!(!window.contains(21));
        assert!(window.contains(22));
    }

    #[test]
    fn test_evicted_row_regenerates_identically() {
        let tuning = Tuning::default();
        let mut window = LaneWindow::new();
        window.ensure(0, 9, &tuning);
        let original = window.get(3).cloned();

        window.ensure(40, 9, &tuning);
        assert!(!window.contains(3));

        window.ensure(0, 9, &tuning);
        assert_eq!(window.get(3).cloned(), original);
    }

    #[test]
    fn test_lookup_past_edge_is_none() {
        let mut window = LaneWindow::new();
        window.ensure(0, 1, &Tuning::default());
        assert!(window.get(500).is_none());
    }

    proptest! {
        #[test]
        fn prop_window_bounds_hold(rows in proptest::collection::vec(0u32..3_000, 1..12)) {
            let tuning = Tuning::default();
            let mut window = LaneWindow::new();
            for &row in &rows {
                window.ensure(row, 5, &tuning);
                for r in window_range(row) {
                    prop_assert!(window.contains(r));
                }
                let floor = eviction_floor(row);
                prop_assert!(window.iter().all(|lane| lane.row >= floor));
            }
        }
    }
}
