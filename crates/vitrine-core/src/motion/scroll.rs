//! Scroll animation controller
//!
//! Combines easing functions and timing utilities to move the page scroll
//! offset towards a target over a fixed duration.

use std::time::Duration;

use super::timing::{is_complete, lerp, progress};
use crate::config::{EasingType, ScrollConfig};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Get animation duration as Duration
    fn animation_duration(&self) -> Duration;

    /// Get tick duration for animation FPS, never shorter than 1 ms
    fn animation_tick_duration(&self) -> Duration;

    /// Get the minimum spacing between scroll reactions
    fn throttle_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }

    #[inline]
    fn throttle_duration(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Page time the animation started at
    start: Duration,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call `scroll_to()` to begin an animation, then `update()` every frame to
/// get the interpolated offset to apply.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final offset of the running animation
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.to)
    }

    /// Start animating from `from` to `to`
    ///
    /// Returns the offset to apply right away when no animation is needed
    /// (smooth scrolling disabled, or already at the target).
    pub fn scroll_to(&mut self, from: f64, to: f64, now: Duration) -> Option<f64> {
        if !self.config.is_smooth() || (from - to).abs() < f64::EPSILON {
            self.animation = None;
            return Some(to);
        }

        // A new target restarts from wherever the page currently is
        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
        None
    }

    /// Advance the animation to `now` and return the offset to apply
    pub fn update(&mut self, now: Duration) -> Option<f64> {
        let anim = self.animation.as_ref()?;
        let elapsed = now.saturating_sub(anim.start);

        if is_complete(elapsed, anim.duration) {
            let to = anim.to;
            self.animation = None;
            return Some(to);
        }

        let t = anim.easing.apply(progress(elapsed, anim.duration));
        Some(lerp(anim.from, anim.to, t))
    }

    /// Cancel any active animation and stop where the page is
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}
