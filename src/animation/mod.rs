//! Click-feedback animation: easing curves and the per-label timeline
//! state machine.

pub mod click;
pub mod easing;

pub use click::{ClickAnimator, ClickPhase, ClickSample, ClickTiming};
pub use easing::EasingFunction;
