//! Time calculation utilities for animations
//!
//! Provides pure functions for calculating animation progress and interpolation.

use std::time::Duration;

/// Animation progress (0.0 to 1.0) after `elapsed` of a `duration` long animation
///
/// A zero duration is immediately complete.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolated integer counter value: `floor(progress * target)`
#[inline]
pub fn counter_value(target: i64, elapsed: Duration, duration: Duration) -> i64 {
    (progress(elapsed, duration) * target as f64).floor() as i64
}
