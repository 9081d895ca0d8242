//! Platform abstraction layer
//!
//! Host-facing helpers the simulation stays independent of:
//! - Time (wall-clock source for animation timing)
//! - Input (keyboard event normalization)

pub mod input;
pub mod time;

pub use input::normalize_key;
pub use time::{Clock, ManualClock, SystemClock};
