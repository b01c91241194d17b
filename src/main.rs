//! Lane Hopper native entry point
//!
//! Runs a headless session with a simple autopilot so the simulation can be
//! exercised without a renderer:
//!
//! ```text
//! lane-hopper [seed] [max_frames] [tuning.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_hopper::audio::LogBackend;
    use lane_hopper::platform::{FrameStatus, Session};
    use lane_hopper::{Settings, Tuning};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    let max_frames = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(60 * 120);
    let tuning = args.next().map(|path| Tuning::load_from(path)).unwrap_or_default();

    log::info!("Lane Hopper (native) starting...");
    let mut session = Session::new(seed, tuning, Settings::default(), LogBackend);

    // ~60 Hz host refresh; the autopilot decides every 6th frame
    const FRAME_MS: f64 = 1000.0 / 60.0;
    for frame in 0..max_frames {
        if session.on_frame(frame as f64 * FRAME_MS) == FrameStatus::Stopped {
            break;
        }
        if session.state().is_over() {
            break;
        }
        if frame % 6 == 0 {
            if let Some(intent) = autopilot::choose(session.state()) {
                session.handle_intent(intent);
            }
        }
    }

    let hud = session.view().hud;
    session.shutdown();
    println!(
        "seed {}: score {} ({} rows), coins {}, {}",
        seed,
        hud.score,
        session.state().score,
        hud.coins,
        if hud.game_over { "crashed" } else { "survived" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `platform::Session` directly
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use lane_hopper::sim::{GameState, MoveIntent, ObstacleKind, player_interval};

    /// Extra clearance required around cars before stepping into their lane
    const SAFETY_MARGIN: f32 = 12.0;

    /// Hop forward when the next lane is clear, otherwise sidestep or wait
    pub fn choose(state: &GameState) -> Option<MoveIntent> {
        let row = state.player.row;
        let column = state.player.column;

        if !threatened(state, row + 1, column) {
            return Some(MoveIntent::Up);
        }
        if threatened(state, row, column) && row > 0 && !threatened(state, row - 1, column) {
            return Some(MoveIntent::Down);
        }
        None
    }

    fn threatened(state: &GameState, row: u32, column: u32) -> bool {
        let Some(lane) = state.lanes.get(row) else {
            return true;
        };
        let (left, right) = player_interval(column);
        lane.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Car)
            .any(|o| left - SAFETY_MARGIN < o.right() && right + SAFETY_MARGIN > o.left())
    }
}
