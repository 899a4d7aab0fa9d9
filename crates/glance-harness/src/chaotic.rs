//! Fault-injecting gateway wrapper.
//!
//! Delegates to an inner backend but fails a seeded fraction of calls with a
//! transport error, so delete and search error paths get exercised
//! reproducibly.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use glance_core::{BlobStore, DataGateway, GatewayError, Post, Profile, Story, Table};

/// Message carried by injected failures.
pub const INJECTED_FAILURE: &str = "chaotic failure injection";

/// Linear congruential generator for reproducible chaos.
#[derive(Debug)]
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in `[0.0, 1.0)`.
    fn next(&mut self) -> f64 {
        // Numerical Recipes constants
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }
}

/// Gateway wrapper that randomly fails calls.
#[derive(Debug, Clone)]
pub struct ChaoticGateway<G> {
    inner: G,
    failure_rate: f64,
    rng: Arc<Mutex<ChaoticRng>>,
    calls: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl<G> ChaoticGateway<G> {
    /// Wrap `inner`, failing calls with probability `failure_rate`.
    ///
    /// Rates outside `[0, 1]` are clamped.
    pub fn new(inner: G, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Like [`ChaoticGateway::new`] with an explicit seed.
    pub fn with_seed(inner: G, failure_rate: f64, seed: u64) -> Self {
        Self {
            inner,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            calls: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wrapped backend, for checking state after chaos.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Calls attempted.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }

    /// Calls that were failed on purpose.
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Acquire)
    }

    fn roll(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::AcqRel);
        let fail = self.rng.lock().unwrap_or_else(PoisonError::into_inner).next() < self.failure_rate;
        if fail {
            self.failures.fetch_add(1, Ordering::AcqRel);
            tracing::debug!("injecting gateway failure");
            return Err(GatewayError::Transport(INJECTED_FAILURE.to_owned()));
        }
        Ok(())
    }
}

impl<G: DataGateway> DataGateway for ChaoticGateway<G> {
    async fn search_posts(&self, pattern: &str) -> Result<Vec<Post>, GatewayError> {
        self.roll()?;
        self.inner.search_posts(pattern).await
    }

    async fn search_profiles(&self, pattern: &str, limit: usize) -> Result<Vec<Profile>, GatewayError> {
        self.roll()?;
        self.inner.search_profiles(pattern, limit).await
    }

    async fn list_stories(&self) -> Result<Vec<Story>, GatewayError> {
        self.roll()?;
        self.inner.list_stories().await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, GatewayError> {
        self.roll()?;
        self.inner.list_posts().await
    }

    async fn delete_row(&self, table: Table, id: &str) -> Result<(), GatewayError> {
        self.roll()?;
        self.inner.delete_row(table, id).await
    }
}

impl<G: BlobStore> BlobStore for ChaoticGateway<G> {
    async fn remove(&self, bucket: &str, names: &[String]) -> Result<(), GatewayError> {
        self.roll()?;
        self.inner.remove(bucket, names).await
    }
}
