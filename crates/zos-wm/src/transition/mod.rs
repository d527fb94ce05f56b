//! Window transitions
//!
//! Easing curves plus the per-window [`Animation`] record. The server owns
//! ticking; this module only knows how to sample a record at a time.

mod animation;
mod easing;

pub use animation::{Animation, AnimationKind, Completion, Frame, ZOOM_MIN_SCALE};
pub use easing::{bounce, ease, ease_in, ease_in_out, ease_out, linear, spring, Curve};

/// Tick cadence while at least one animation is live (~60 Hz)
pub const TICK_INTERVAL_MS: f64 = 16.0;
