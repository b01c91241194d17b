//! Lanes and the procedural lane generator
//!
//! A lane is one row of the world grid. Grass lanes are rest stops; road lanes
//! carry cars scrolling at a fixed speed and the occasional coin.
//!
//! Generation is a pure function of `(seed, row, tuning)`: each row gets its
//! own PCG stream, so a row evicted from the window regenerates identically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::LANE_WIDTH;
use crate::tuning::Tuning;

/// Lane types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    /// Safe rest stop, never has obstacles
    Grass,
    /// Hazard strip with moving cars and collectible coins
    Road,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Moves with the lane, crashes the player on contact
    Car,
    /// Stationary, collected on contact
    Coin,
}

/// Something sitting in a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Left edge in percent of lane width (briefly outside 0-100 while wrapping)
    pub position: f32,
    /// Width in percent of lane width
    pub width: f32,
}

impl Obstacle {
    pub fn car(position: f32, width: f32) -> Self {
        Self {
            kind: ObstacleKind::Car,
            position,
            width,
        }
    }

    pub fn coin(position: f32, width: f32) -> Self {
        Self {
            kind: ObstacleKind::Coin,
            position,
            width,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position + self.width
    }

    /// Whether an object at `[x, x + width]` would come within `gap` of this one
    fn crowds(&self, x: f32, width: f32, gap: f32) -> bool {
        x < self.right() + gap && x + width + gap > self.left()
    }

    /// Whether a coin at `[x, x + width]` overlaps this one or sits within
    /// `gap` past its right edge
    fn blocks_coin(&self, x: f32, width: f32, gap: f32) -> bool {
        x < self.right() + gap && x + width > self.left()
    }
}

/// One row of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Absolute row index (0 = start line)
    pub row: u32,
    pub kind: LaneKind,
    /// Percent of lane width per millisecond; sign is scroll direction
    pub speed: f32,
    pub obstacles: Vec<Obstacle>,
}

impl Lane {
    pub fn grass(row: u32) -> Self {
        Self {
            row,
            kind: LaneKind::Grass,
            speed: 0.0,
            obstacles: Vec::new(),
        }
    }

    pub fn is_road(&self) -> bool {
        self.kind == LaneKind::Road
    }

    pub fn cars(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.kind == ObstacleKind::Car)
    }

    pub fn coins(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.kind == ObstacleKind::Coin)
    }
}

/// Whether a row is a rest stop
pub fn is_rest_row(row: u32, tuning: &Tuning) -> bool {
    row == 0 || row % tuning.gap_for_row(row) == 0
}

/// Per-row RNG stream derived from the run seed
pub fn lane_rng(seed: u64, row: u32) -> Pcg32 {
    let row_seed = (row as u64).wrapping_mul(2654435761).wrapping_add(seed);
    Pcg32::seed_from_u64(row_seed)
}

/// Generate the lane for `row` in the run identified by `seed`
pub fn generate_lane(row: u32, seed: u64, tuning: &Tuning) -> Lane {
    let mut rng = lane_rng(seed, row);
    generate_lane_with(row, tuning, &mut rng)
}

/// Generate the lane for `row`, drawing from the supplied RNG
pub fn generate_lane_with<R: Rng>(row: u32, tuning: &Tuning, rng: &mut R) -> Lane {
    if is_rest_row(row, tuning) {
        return Lane::grass(row);
    }

    let magnitude = tuning.min_speed + rng.random::<f32>() * (tuning.max_speed - tuning.min_speed);
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let speed = magnitude * tuning.difficulty_for_row(row) * direction;

    let mut obstacles = Vec::new();
    place_cars(row, tuning, rng, &mut obstacles);
    place_coin(row, tuning, rng, &mut obstacles);

    Lane {
        row,
        kind: LaneKind::Road,
        speed,
        obstacles,
    }
}

/// Best-effort car placement: a car that can't find room is dropped
fn place_cars<R: Rng>(row: u32, tuning: &Tuning, rng: &mut R, obstacles: &mut Vec<Obstacle>) {
    let max_cars = tuning.max_cars.max(tuning.min_cars);
    let num_cars = rng.random_range(tuning.min_cars..=max_cars);
    let span = (LANE_WIDTH - tuning.car_width).max(0.0);

    for _ in 0..num_cars {
        let placed = (0..tuning.car_attempts).any(|_| {
            let x = rng.random::<f32>() * span;
            let blocked = obstacles
                .iter()
                .any(|obs| obs.crowds(x, tuning.car_width, tuning.car_gap));
            if !blocked {
                obstacles.push(Obstacle::car(x, tuning.car_width));
            }
            !blocked
        });
        if !placed {
            log::debug!("Row {}: car omitted after {} attempts", row, tuning.car_attempts);
        }
    }
}

/// Occasionally drop a coin somewhere clear of the cars
fn place_coin<R: Rng>(row: u32, tuning: &Tuning, rng: &mut R, obstacles: &mut Vec<Obstacle>) {
    if !rng.random_bool(tuning.coin_chance.clamp(0.0, 1.0)) {
        return;
    }

    for _ in 0..tuning.coin_attempts {
        let x = rng.random::<f32>() * tuning.coin_span;
        let blocked = obstacles
            .iter()
            .any(|obs| obs.blocks_coin(x, tuning.coin_width, tuning.coin_gap));
        if !blocked {
            obstacles.push(Obstacle::coin(x, tuning.coin_width));
            return;
        }
    }
    log::debug!("Row {}: coin omitted after {} attempts", row, tuning.coin_attempts);
}
