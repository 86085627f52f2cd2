//! Fixed-duration motion on page time
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers
//! - `scroll` - Scroll animation controller used by anchor navigation
//!
//! All functions take elapsed page time explicitly instead of reading a
//! clock, so every animation is reproducible frame by frame.

pub mod easing;
pub mod timing;

pub mod scroll;

pub use scroll::ScrollAnimator;
