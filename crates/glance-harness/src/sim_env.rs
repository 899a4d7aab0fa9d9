//! Virtual-clock environment.
//!
//! Time only moves when a test advances it or when something sleeps. A sleep
//! advances the clock by its duration on first poll and completes
//! immediately, so a runtime racing input against a frame sleep sees exactly
//! one frame of virtual time pass per idle cycle.

use std::{
    ops::{Add, Sub},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use glance_core::Environment;

/// Wall clock reported at virtual time zero (2024-01-01T00:00:00Z).
pub const DEFAULT_WALL_CLOCK_SECS: u64 = 1_704_067_200;

/// Instant on the virtual clock, measured from simulation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// Instant `millis` after simulation start.
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Time since simulation start.
    pub fn since_start(self) -> Duration {
        self.0
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

impl Add<Duration> for SimInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

/// Deterministic environment with a shared virtual clock.
///
/// Clones share the clock.
#[derive(Debug, Clone)]
pub struct SimEnv {
    nanos: Arc<AtomicU64>,
    wall_clock_secs: u64,
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl SimEnv {
    /// Clock at zero.
    pub fn new() -> Self {
        Self::with_wall_clock(DEFAULT_WALL_CLOCK_SECS)
    }

    /// Clock at zero, reporting `secs` as the wall-clock time at zero.
    pub fn with_wall_clock(secs: u64) -> Self {
        Self { nanos: Arc::new(AtomicU64::new(0)), wall_clock_secs: secs }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::AcqRel);
    }

    /// Time since simulation start.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
}

impl Environment for SimEnv {
    type Instant = SimInstant;

    fn now(&self) -> SimInstant {
        SimInstant(self.elapsed())
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        let env = self.clone();
        async move { env.advance(duration) }
    }

    fn wall_clock_secs(&self) -> u64 {
        self.wall_clock_secs + self.elapsed().as_secs()
    }
}
