//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic clocks)
//! - Input events (keyboard and touch normalization)

pub mod input;
pub mod time;

pub use input::{Direction, InputNormalizer};
pub use time::{Clock, ManualClock};
