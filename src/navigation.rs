//! Navigation seam and the debounced post-animation scheduler.
//!
//! The engine never performs navigation itself; it hands a route string
//! to a host-supplied [`Navigator`] after the click-feedback delay. One
//! request can be pending at a time — scheduling while another request
//! is in flight is dropped, which together with the animator's
//! re-entrancy guard debounces rapid clicks.

use web_time::Instant;

/// Host collaborator that performs the actual route change.
///
/// `navigate` is equivalent to an address-bar change and is invoked only
/// from the engine's per-frame pending-navigation poll.
pub trait Navigator {
    /// The route the host currently displays.
    fn current_route(&self) -> &str;

    /// Perform a full navigation to `route`.
    fn navigate(&mut self, route: &str);
}

/// A [`Navigator`] that records the route and logs the transition.
///
/// Used by the standalone viewer binary; embedders supply their own.
#[derive(Debug, Clone)]
pub struct LogNavigator {
    route: String,
}

impl LogNavigator {
    /// Start at the given route.
    #[must_use]
    pub fn new(initial_route: impl Into<String>) -> Self {
        Self {
            route: initial_route.into(),
        }
    }
}

impl Default for LogNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for LogNavigator {
    fn current_route(&self) -> &str {
        &self.route
    }

    fn navigate(&mut self, route: &str) {
        log::info!("navigating {} -> {route}", self.route);
        self.route = route.to_owned();
    }
}

/// One scheduled navigation request.
#[derive(Debug, Clone)]
struct PendingNavigation {
    route: String,
    due: Instant,
}

/// Single-slot deadline scheduler polled once per frame.
#[derive(Debug, Default)]
pub struct NavigationScheduler {
    pending: Option<PendingNavigation>,
}

impl NavigationScheduler {
    /// Empty scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Whether a request is waiting for its deadline.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule a navigation to fire at `due`. Dropped if another
    /// request is already pending.
    pub fn schedule(&mut self, route: impl Into<String>, due: Instant) {
        if self.pending.is_some() {
            log::debug!("navigation already pending, dropping request");
            return;
        }
        self.pending = Some(PendingNavigation {
            route: route.into(),
            due,
        });
    }

    /// Schedule a navigation only if `route` differs from the route the
    /// host currently displays. Same-route activations animate without
    /// ever navigating.
    pub fn schedule_transition(
        &mut self,
        route: &str,
        current_route: &str,
        due: Instant,
    ) {
        if route == current_route {
            log::debug!("already on {route}, navigation skipped");
            return;
        }
        self.schedule(route, due);
    }

    /// Fire the pending request if its deadline has passed.
    pub fn poll(&mut self, now: Instant, navigator: &mut dyn Navigator) {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.due);
        if due {
            if let Some(p) = self.pending.take() {
                navigator.navigate(&p.route);
            }
        }
    }

    /// Drop any pending request without firing it (teardown).
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    #[test]
    fn fires_once_after_deadline() {
        let mut nav = LogNavigator::new("/");
        let mut sched = NavigationScheduler::new();
        let now = Instant::now();

        sched.schedule("/resume", now + Duration::from_millis(600));

        sched.poll(now + Duration::from_millis(599), &mut nav);
        assert_eq!(nav.current_route(), "/");
        assert!(sched.is_pending());

        sched.poll(now + Duration::from_millis(600), &mut nav);
        assert_eq!(nav.current_route(), "/resume");
        assert!(!sched.is_pending());

        // Nothing left to fire.
        sched.poll(now + Duration::from_secs(10), &mut nav);
        assert_eq!(nav.current_route(), "/resume");
    }

    #[test]
    fn second_schedule_is_dropped_while_pending() {
        let mut nav = LogNavigator::new("/");
        let mut sched = NavigationScheduler::new();
        let now = Instant::now();

        sched.schedule("/about", now + Duration::from_millis(600));
        sched.schedule("/resume", now + Duration::from_millis(1));

        sched.poll(now + Duration::from_secs(1), &mut nav);
        assert_eq!(nav.current_route(), "/about");
    }

    #[test]
    fn same_route_click_never_navigates() {
        // "ABOUT" clicked while already on /about: the animation plays
        // upstream, but nothing is ever scheduled here.
        let mut sched = NavigationScheduler::new();
        let now = Instant::now();
        sched.schedule_transition(
            "/about",
            "/about",
            now + Duration::from_millis(600),
        );
        assert!(!sched.is_pending());
    }

    #[test]
    fn route_change_navigates_mid_revert() {
        use crate::animation::{ClickAnimator, ClickTiming};

        // "RESUME" clicked from "/": navigation fires at the configured
        // delay, strictly before the revert finishes.
        let timing = ClickTiming::default();
        let mut anim = ClickAnimator::new(timing, 1);
        let mut nav = LogNavigator::new("/");
        let mut sched = NavigationScheduler::new();

        let t0 = Instant::now();
        assert!(anim.try_activate(0, t0));
        sched.schedule_transition("/resume", nav.current_route(), t0 + timing.nav_delay);

        // The delay lands inside the animation window.
        assert!(timing.nav_delay < timing.total());

        let fire = t0 + timing.nav_delay;
        sched.poll(fire, &mut nav);
        assert_eq!(nav.current_route(), "/resume");

        // The label is still reverting when the route changes.
        assert!(anim.is_animating(0));
        let sample = anim.sample(0, fire);
        assert!(sample.scale > 1.0);
    }

    #[test]
    fn cancel_discards_pending() {
        let mut nav = LogNavigator::new("/");
        let mut sched = NavigationScheduler::new();
        let now = Instant::now();

        sched.schedule("/about", now);
        sched.cancel();
        sched.poll(now + Duration::from_secs(1), &mut nav);
        assert_eq!(nav.current_route(), "/");
    }
}
