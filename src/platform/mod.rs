//! Platform abstraction layer
//!
//! Everything the host (browser or native shell) plugs into:
//! - Frame timing and loop cancellation
//! - Session wiring input, simulation, feedback and the view

pub mod session;
pub mod time;

pub use session::Session;
pub use time::{CancelToken, FrameClock, FrameLoop, FrameStatus};
