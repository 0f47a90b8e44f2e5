//! Motion primitives for sliding overlay entries in and out.
//!
//! This crate wraps the small set of building blocks the notification
//! controller animates with:
//! - Easing curves mapping linear progress to eased progress.
//! - A time-based driver that runs progress between 0 and 1 on a tokio
//!   ticker task and notifies listeners on every frame.
//! - The offset math turning eased progress, content height and drag offset
//!   into an entry position.
//!
//! # Timing
//! The driver measures time with [`tokio::time::Instant`], so runs follow a
//! paused or manually advanced test clock.

pub mod curve;
pub mod driver;
pub mod state;

use std::time::Duration;

pub use curve::{Cubic, Curve};
pub use driver::{AnimationDriver, AnimationRun, AnimationStatus};
pub use state::AnimationState;

/// Default interval between two animation frames (roughly 60 frames per
/// second).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Clamps `value` into `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
