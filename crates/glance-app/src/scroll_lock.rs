//! Background scroll suppression for blocking overlays.
//!
//! Each open overlay holds a [`ScrollGuard`]. The root is locked while any
//! guard is alive; dropping the last one unlocks it, including when an
//! overlay is torn down without an explicit close.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Shared scroll state of the page behind overlays.
#[derive(Debug, Clone, Default)]
pub struct ScrollRoot {
    locks: Arc<AtomicUsize>,
}

impl ScrollRoot {
    /// Create an unlocked root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable background scroll until the returned guard drops.
    pub fn lock(&self) -> ScrollGuard {
        self.locks.fetch_add(1, Ordering::AcqRel);
        ScrollGuard { locks: Arc::clone(&self.locks) }
    }

    /// Background scroll is currently disabled.
    pub fn is_locked(&self) -> bool {
        self.lock_count() > 0
    }

    /// Number of live guards.
    pub fn lock_count(&self) -> usize {
        self.locks.load(Ordering::Acquire)
    }
}

/// Keeps background scroll disabled while alive.
#[derive(Debug)]
pub struct ScrollGuard {
    locks: Arc<AtomicUsize>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.locks.fetch_sub(1, Ordering::AcqRel);
    }
}
