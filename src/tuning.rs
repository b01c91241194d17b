//! Data-driven lane generation balance
//!
//! Every number the lane generator draws from lives here so difficulty can be
//! tweaked from a JSON file without touching the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Lane generation parameters (all widths/positions in percent of lane width)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Rest stops ===
    /// Rows between grass lanes at the start of a run
    pub base_gap: u32,
    /// Gap grows by one every this many rows
    pub gap_growth_rows: u32,

    // === Road speed ===
    /// Minimum speed magnitude (percent per millisecond)
    pub min_speed: f32,
    /// Maximum speed magnitude (exclusive)
    pub max_speed: f32,
    /// Speed multiplier growth per row climbed
    pub difficulty_per_row: f32,

    // === Cars ===
    pub min_cars: u32,
    pub max_cars: u32,
    pub car_width: f32,
    /// Free space required on each side of an existing car
    pub car_gap: f32,
    pub car_attempts: u32,

    // === Coins ===
    /// Chance that a road lane tries to place a coin
    pub coin_chance: f64,
    pub coin_width: f32,
    /// Free space required between a coin and any car
    pub coin_gap: f32,
    pub coin_attempts: u32,
    /// Coins are placed in `[0, coin_span)`
    pub coin_span: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_gap: 5,
            gap_growth_rows: 1000,

            min_speed: 0.01,
            max_speed: 0.03,
            difficulty_per_row: 0.001,

            min_cars: 1,
            max_cars: 2,
            car_width: 15.0,
            car_gap: 20.0,
            car_attempts: 10,

            coin_chance: 0.2,
            coin_width: 5.0,
            coin_gap: 5.0,
            coin_attempts: 5,
            coin_span: 90.0,
        }
    }
}

impl Tuning {
    /// Rest stop spacing for a row (non-decreasing in `row`)
    pub fn gap_for_row(&self, row: u32) -> u32 {
        self.base_gap + row / self.gap_growth_rows.max(1)
    }

    /// Speed multiplier applied to lanes further up the run
    pub fn difficulty_for_row(&self, row: u32) -> f32 {
        1.0 + row as f32 * self.difficulty_per_row
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_steps_every_thousand_rows() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gap_for_row(0), 5);
        assert_eq!(tuning.gap_for_row(999), 5);
        assert_eq!(tuning.gap_for_row(1000), 6);
        assert_eq!(tuning.gap_for_row(2500), 7);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "car_width": 10.0, "coin_chance": 1.0 }"#).unwrap();
        assert_eq!(tuning.car_width, 10.0);
        assert_eq!(tuning.coin_chance, 1.0);
        assert_eq!(tuning.base_gap, 5);
        assert_eq!(tuning.car_attempts, 10);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let tuning = Tuning::load_from("/nonexistent/lane-hopper/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
