//! Per-label click-feedback state machine.
//!
//! Each label owns one phase track:
//! `Idle → Activating → Holding → Reverting → Idle`. Activation scales
//! the label toward the configured peak while the distortion/ripple
//! multiplier rises toward its own peak; reverting tweens both back to
//! their initial values. A label returns to `Idle` only after the revert
//! finishes, and activation requests while any phase is in flight are
//! ignored — no queueing.
//!
//! The machine is sampled with explicit `Instant`s so tests can drive it
//! with synthetic clocks.

use web_time::{Duration, Instant};

use super::easing::EasingFunction;
use crate::options::AnimationOptions;

/// Durations and peaks of the click animation.
#[derive(Debug, Clone, Copy)]
pub struct ClickTiming {
    /// Scale-up phase duration.
    pub activate: Duration,
    /// Hold at peak.
    pub hold: Duration,
    /// Revert phase duration.
    pub revert: Duration,
    /// Delay from activation start to navigation.
    pub nav_delay: Duration,
    /// Peak scale multiplier.
    pub scale_peak: f32,
    /// Peak distortion/ripple multiplier.
    pub effect_peak: f32,
    /// Easing applied to the activate and revert tweens.
    pub easing: EasingFunction,
}

impl ClickTiming {
    /// Total wall time from activation to return-to-idle.
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.activate
            .saturating_add(self.hold)
            .saturating_add(self.revert)
    }
}

impl From<&AnimationOptions> for ClickTiming {
    fn from(opts: &AnimationOptions) -> Self {
        Self {
            activate: Duration::from_millis(opts.activate_ms),
            hold: Duration::from_millis(opts.hold_ms),
            revert: Duration::from_millis(opts.revert_ms),
            nav_delay: Duration::from_millis(opts.nav_delay_ms),
            scale_peak: opts.scale_peak,
            effect_peak: opts.effect_peak,
            easing: EasingFunction::DEFAULT,
        }
    }
}

impl Default for ClickTiming {
    fn default() -> Self {
        Self::from(&AnimationOptions::default())
    }
}

/// Phase of one label's click animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPhase {
    /// No animation in flight.
    Idle,
    /// Scaling up toward the peak.
    Activating {
        /// When this phase began.
        started: Instant,
    },
    /// Holding at the peak.
    Holding {
        /// When this phase began.
        started: Instant,
    },
    /// Tweening back to the initial values.
    Reverting {
        /// When this phase began.
        started: Instant,
    },
}

/// Interpolated multipliers for one label at one sample time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickSample {
    /// Scale multiplier applied on top of the sizer's base scale.
    pub scale: f32,
    /// Multiplier applied to the label's initial distortion strength
    /// and ripple intensity.
    pub effect: f32,
}

impl ClickSample {
    /// The resting sample (no animation contribution).
    pub const IDLE: Self = Self {
        scale: 1.0,
        effect: 1.0,
    };
}

/// Phase progress in [0, 1] for a phase that began at `started`.
fn progress(started: Instant, now: Instant, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started);
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

/// Click-feedback driver for the whole label set.
///
/// Holds one [`ClickPhase`] per label, addressed by the label's index in
/// the scene — the animator never owns label resources.
pub struct ClickAnimator {
    timing: ClickTiming,
    phases: Vec<ClickPhase>,
}

impl ClickAnimator {
    /// Create an animator for `label_count` labels, all idle.
    #[must_use]
    pub fn new(timing: ClickTiming, label_count: usize) -> Self {
        Self {
            timing,
            phases: vec![ClickPhase::Idle; label_count],
        }
    }

    /// The configured timing.
    #[must_use]
    pub const fn timing(&self) -> &ClickTiming {
        &self.timing
    }

    /// Reset to a new label count (labels are created once per mount,
    /// so this runs only when the scene is built).
    pub fn reset(&mut self, label_count: usize) {
        self.phases.clear();
        self.phases.resize(label_count, ClickPhase::Idle);
    }

    /// Whether the label is anywhere in its animation.
    #[must_use]
    pub fn is_animating(&self, index: usize) -> bool {
        self.phases
            .get(index)
            .is_some_and(|p| *p != ClickPhase::Idle)
    }

    /// Begin the activation phase for a label.
    ///
    /// Returns `false` — and changes nothing — if the label is already
    /// animating or the index is out of range.
    pub fn try_activate(&mut self, index: usize, now: Instant) -> bool {
        match self.phases.get_mut(index) {
            Some(phase) if *phase == ClickPhase::Idle => {
                *phase = ClickPhase::Activating { started: now };
                true
            }
            _ => false,
        }
    }

    /// Advance one label's phase track and sample its multipliers.
    ///
    /// Phase transitions happen here: a finished activation enters the
    /// hold, a finished hold enters the revert, and a finished revert
    /// returns the label to `Idle` at exactly the resting sample.
    pub fn sample(&mut self, index: usize, now: Instant) -> ClickSample {
        let Some(phase) = self.phases.get_mut(index) else {
            return ClickSample::IDLE;
        };

        loop {
            match *phase {
                ClickPhase::Idle => return ClickSample::IDLE,
                ClickPhase::Activating { started } => {
                    let t = progress(started, now, self.timing.activate);
                    if t >= 1.0 {
                        *phase = ClickPhase::Holding {
                            started: started + self.timing.activate,
                        };
                        continue;
                    }
                    let eased = self.timing.easing.evaluate(t);
                    return ClickSample {
                        scale: 1.0 + (self.timing.scale_peak - 1.0) * eased,
                        effect: 1.0
                            + (self.timing.effect_peak - 1.0) * eased,
                    };
                }
                ClickPhase::Holding { started } => {
                    let t = progress(started, now, self.timing.hold);
                    if t >= 1.0 {
                        *phase = ClickPhase::Reverting {
                            started: started + self.timing.hold,
                        };
                        continue;
                    }
                    return ClickSample {
                        scale: self.timing.scale_peak,
                        effect: self.timing.effect_peak,
                    };
                }
                ClickPhase::Reverting { started } => {
                    let t = progress(started, now, self.timing.revert);
                    if t >= 1.0 {
                        *phase = ClickPhase::Idle;
                        return ClickSample::IDLE;
                    }
                    let eased = self.timing.easing.evaluate(t);
                    return ClickSample {
                        scale: self.timing.scale_peak
                            + (1.0 - self.timing.scale_peak) * eased,
                        effect: self.timing.effect_peak
                            + (1.0 - self.timing.effect_peak) * eased,
                    };
                }
            }
        }
    }

    /// Cancel every in-flight animation without applying final state
    /// (used on teardown).
    pub fn cancel_all(&mut self) {
        for phase in &mut self.phases {
            *phase = ClickPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> ClickAnimator {
        ClickAnimator::new(ClickTiming::default(), 4)
    }

    #[test]
    fn idle_sample_is_resting() {
        let mut anim = animator();
        assert_eq!(
            anim.sample(0, Instant::now()),
            ClickSample::IDLE
        );
        assert!(!anim.is_animating(0));
    }

    #[test]
    fn activation_scales_toward_peak() {
        let mut anim = animator();
        let start = Instant::now();
        assert!(anim.try_activate(0, start));
        assert!(anim.is_animating(0));

        let mid = anim.sample(0, start + Duration::from_millis(125));
        assert!(mid.scale > 1.0 && mid.scale < 1.4);
        assert!(mid.effect > 1.0 && mid.effect < 2.0);

        // Into the hold: exactly the peaks.
        let held = anim.sample(0, start + Duration::from_millis(300));
        assert_eq!(held.scale, 1.4);
        assert_eq!(held.effect, 2.0);
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut anim = animator();
        let start = Instant::now();
        assert!(anim.try_activate(2, start));

        // Past activate + hold + revert: idle at the resting sample.
        let done =
            anim.sample(2, start + anim.timing().total());
        assert_eq!(done, ClickSample::IDLE);
        assert!(!anim.is_animating(2));
    }

    #[test]
    fn reverting_only_after_hold() {
        let mut anim = animator();
        let start = Instant::now();
        assert!(anim.try_activate(0, start));

        // 500ms: 100ms into the 450ms revert — below the peak but above
        // resting.
        let s = anim.sample(0, start + Duration::from_millis(500));
        assert!(s.scale < 1.4 && s.scale > 1.0);
    }

    #[test]
    fn reentrant_activation_is_ignored() {
        let mut anim = animator();
        let start = Instant::now();
        assert!(anim.try_activate(1, start));
        // Second click mid-animation: no new timeline.
        assert!(!anim.try_activate(1, start + Duration::from_millis(10)));

        // The original timeline still completes on schedule.
        let done = anim.sample(1, start + anim.timing().total());
        assert_eq!(done, ClickSample::IDLE);
        // And the label can be activated again afterwards.
        assert!(anim.try_activate(1, start + anim.timing().total()));
    }

    #[test]
    fn out_of_range_index_is_inert() {
        let mut anim = animator();
        assert!(!anim.try_activate(99, Instant::now()));
        assert_eq!(anim.sample(99, Instant::now()), ClickSample::IDLE);
    }

    #[test]
    fn cancel_all_returns_to_idle() {
        let mut anim = animator();
        let start = Instant::now();
        assert!(anim.try_activate(0, start));
        assert!(anim.try_activate(3, start));
        anim.cancel_all();
        assert!(!anim.is_animating(0));
        assert!(!anim.is_animating(3));
    }

    #[test]
    fn zero_duration_phases_complete_immediately() {
        let timing = ClickTiming {
            activate: Duration::ZERO,
            hold: Duration::ZERO,
            revert: Duration::ZERO,
            ..ClickTiming::default()
        };
        let mut anim = ClickAnimator::new(timing, 1);
        let start = Instant::now();
        assert!(anim.try_activate(0, start));
        assert_eq!(anim.sample(0, start), ClickSample::IDLE);
        assert!(!anim.is_animating(0));
    }
}
