//! Easing curves for anchor scrolling
//!
//! Each curve maps the elapsed fraction of an animation onto the fraction of
//! the scroll distance already covered. Inputs outside [0, 1] are clamped.

use crate::config::EasingType;

impl EasingType {
    /// Fraction of the distance covered once `t` of the duration has elapsed
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // Stays put, then lands on the target in the final frame
            EasingType::None if t < 1.0 => 0.0,
            EasingType::None => 1.0,
            EasingType::Linear => t,
            EasingType::Cubic => decelerate(t, 3),
            EasingType::Quintic => decelerate(t, 5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - (-10.0 * t).exp2(),
        }
    }
}

/// `1 - (1 - t)^power`: fast start, gentle landing
fn decelerate(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}
