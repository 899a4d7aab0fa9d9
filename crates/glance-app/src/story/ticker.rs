//! Playback clock for a single story.
//!
//! The ticker accumulates elapsed display time from the instants it is fed.
//! Suspending drops the anchor instant but keeps the accumulator, so a paused
//! story resumes exactly where it stopped instead of jumping ahead by the
//! paused interval.

use std::{ops::Sub, time::Duration};

/// Result of feeding one instant to a [`Ticker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Elapsed fraction of the display duration, in `[0, 100]`.
    pub progress: f64,
    /// The display duration is exhausted.
    pub expired: bool,
}

/// Elapsed-time accumulator with pause semantics.
#[derive(Debug, Clone)]
pub struct Ticker<I> {
    duration: Duration,
    elapsed: Duration,
    anchor: Option<I>,
}

impl<I> Ticker<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create a ticker for a story shown for `duration`.
    pub fn new(duration: Duration) -> Self {
        Self { duration, elapsed: Duration::ZERO, anchor: None }
    }

    /// Advance to `now`.
    ///
    /// The first tick after creation, [`Ticker::reset`], or
    /// [`Ticker::suspend`] only sets the anchor; elapsed time starts counting
    /// from there. Instants earlier than the anchor add nothing.
    pub fn tick(&mut self, now: I) -> Tick {
        if let Some(anchor) = self.anchor
            && now > anchor
        {
            self.elapsed += now - anchor;
        }
        self.anchor = Some(now);

        Tick { progress: self.progress(), expired: self.is_expired() }
    }

    /// Stop counting until the next tick. Elapsed time is preserved.
    pub fn suspend(&mut self) {
        self.anchor = None;
    }

    /// Zero the accumulator and drop the anchor.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.anchor = None;
    }

    /// Accumulated display time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Display duration of one story.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the ticker is currently anchored (counting).
    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Elapsed fraction in percent, clamped to 100.
    ///
    /// Exactly `100.0` once the duration is exhausted.
    pub fn progress(&self) -> f64 {
        if self.is_expired() {
            return 100.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64() * 100.0).min(100.0)
    }

    fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Milliseconds since an arbitrary origin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl Sub for Ms {
        type Output = Duration;
        fn sub(self, rhs: Self) -> Duration {
            Duration::from_millis(self.0.saturating_sub(rhs.0))
        }
    }

    fn ticker() -> Ticker<Ms> {
        Ticker::new(Duration::from_millis(5000))
    }

    #[test]
    fn first_tick_only_anchors() {
        let mut t = ticker();
        let tick = t.tick(Ms(1_000));

        assert_eq!(tick.progress, 0.0);
        assert!(!tick.expired);
        assert!(t.is_running());
    }

    #[test]
    fn progress_is_elapsed_fraction() {
        let mut t = ticker();
        t.tick(Ms(0));
        let tick = t.tick(Ms(2_500));

        assert!((tick.progress - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn suspend_freezes_and_resume_continues() {
        let mut t = ticker();
        t.tick(Ms(0));
        t.tick(Ms(1_000));
        t.suspend();

        // Ten seconds pass while suspended
        let resumed = t.tick(Ms(11_000));
        assert!((resumed.progress - 20.0).abs() < f64::EPSILON);

        let later = t.tick(Ms(12_000));
        assert!((later.progress - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn expiry_reports_exactly_one_hundred() {
        let mut t = ticker();
        t.tick(Ms(0));
        let tick = t.tick(Ms(7_123));

        assert!(tick.expired);
        assert_eq!(tick.progress, 100.0);
    }

    #[test]
    fn reset_zeroes_elapsed() {
        let mut t = ticker();
        t.tick(Ms(0));
        t.tick(Ms(3_000));
        t.reset();

        assert_eq!(t.elapsed(), Duration::ZERO);
        assert!(!t.is_running());
        assert_eq!(t.tick(Ms(9_000)).progress, 0.0);
    }

    #[test]
    fn backwards_instant_adds_nothing() {
        let mut t = ticker();
        t.tick(Ms(5_000));
        t.tick(Ms(4_000));

        assert_eq!(t.elapsed(), Duration::ZERO);
    }

    proptest::proptest! {
        #[test]
        fn progress_monotonic_and_bounded(
            steps in proptest::collection::vec((0u64..400, proptest::bool::ANY), 1..80),
        ) {
            let mut t = ticker();
            let mut now = 0u64;
            let mut last = 0.0f64;

            for (delta, suspended) in steps {
                now += delta;
                if suspended {
                    let frozen = t.progress();
                    t.suspend();
                    proptest::prop_assert_eq!(t.progress(), frozen);
                    continue;
                }
                let tick = t.tick(Ms(now));
                proptest::prop_assert!(tick.progress >= last);
                proptest::prop_assert!((0.0..=100.0).contains(&tick.progress));
                proptest::prop_assert_eq!(tick.expired, tick.progress == 100.0);
                last = tick.progress;
            }
        }
    }
}
