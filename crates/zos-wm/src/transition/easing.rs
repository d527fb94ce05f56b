//! Easing curves for window animations
//!
//! Every curve maps `t ∈ [0, 1]` onto eased progress with `ease(0) == 0`
//! and `ease(1) == 1`. Bounce and spring may overshoot in between.

use serde::{Deserialize, Serialize};

/// Easing curve selectable from the config
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    Bounce,
    Spring,
}

/// Linear interpolation (no easing)
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-in
#[inline]
pub fn ease_in(t: f32) -> f32 {
    t * t
}

/// Quadratic ease-out
#[inline]
pub fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Standard bounce-out
pub fn bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Damped elastic spring
pub fn spring(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let c4 = (2.0 * std::f32::consts::PI) / 3.0;
    2f32.powf(-10.0 * t) * ((10.0 * t - 0.75) * c4).sin() + 1.0
}

/// Apply a curve to normalised progress
#[inline]
pub fn ease(t: f32, curve: Curve) -> f32 {
    match curve {
        Curve::Linear => linear(t),
        Curve::EaseIn => ease_in(t),
        Curve::EaseOut => ease_out(t),
        Curve::EaseInOut => ease_in_out(t),
        Curve::Bounce => bounce(t),
        Curve::Spring => spring(t),
    }
}
