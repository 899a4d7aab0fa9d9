//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{Invariant, InvariantResult, PlaybackHistory, ViewerSnapshot, Violation};

fn violation(invariant: &dyn Invariant, index: usize, message: String) -> InvariantResult {
    Err(Violation { invariant: invariant.name(), message: format!("snapshot {index}: {message}") })
}

/// Indices must address an existing story while the viewer is open.
pub struct IndicesInBounds;

impl Invariant for IndicesInBounds {
    fn name(&self) -> &'static str {
        "IndicesInBounds"
    }

    fn check(&self, history: &PlaybackHistory) -> InvariantResult {
        for (i, s) in history.snapshots.iter().enumerate() {
            if s.closed {
                continue;
            }
            if s.group_index >= s.group_count || s.story_index >= s.group_len {
                return violation(
                    self,
                    i,
                    format!(
                        "position ({}, {}) outside {} groups / {} stories",
                        s.group_index, s.story_index, s.group_count, s.group_len
                    ),
                );
            }
        }
        Ok(())
    }
}

/// Progress and every segment stay within `[0, 100]`, and segments agree
/// with the current position.
pub struct ProgressInRange;

impl Invariant for ProgressInRange {
    fn name(&self) -> &'static str {
        "ProgressInRange"
    }

    fn check(&self, history: &PlaybackHistory) -> InvariantResult {
        for (i, s) in history.snapshots.iter().enumerate() {
            if !(0.0..=100.0).contains(&s.progress) {
                return violation(self, i, format!("progress {} out of range", s.progress));
            }
            if s.closed {
                continue;
            }
            for (j, fill) in s.segments.iter().enumerate() {
                let expected = match j.cmp(&s.story_index) {
                    std::cmp::Ordering::Less => 100.0,
                    std::cmp::Ordering::Equal => s.progress,
                    std::cmp::Ordering::Greater => 0.0,
                };
                if (fill - expected).abs() > f64::EPSILON {
                    return violation(self, i, format!("segment {j} is {fill}, expected {expected}"));
                }
            }
        }
        Ok(())
    }
}

/// An in-flight delete always pauses playback.
pub struct DeletingImpliesPaused;

impl Invariant for DeletingImpliesPaused {
    fn name(&self) -> &'static str {
        "DeletingImpliesPaused"
    }

    fn check(&self, history: &PlaybackHistory) -> InvariantResult {
        for (i, s) in history.snapshots.iter().enumerate() {
            if (s.deleting || s.confirming) && !s.paused {
                return violation(self, i, "delete in progress while playing".into());
            }
        }
        Ok(())
    }
}

/// Once closed, the viewer stays closed with nothing scheduled.
pub struct ClosedIsFinal;

impl Invariant for ClosedIsFinal {
    fn name(&self) -> &'static str {
        "ClosedIsFinal"
    }

    fn check(&self, history: &PlaybackHistory) -> InvariantResult {
        let mut closed_at = None;
        for (i, s) in history.snapshots.iter().enumerate() {
            if s.closed && s.pending_timer {
                return violation(self, i, "timer pending after close".into());
            }
            match (closed_at, s.closed) {
                (None, true) => closed_at = Some(i),
                (Some(at), false) => {
                    return violation(self, i, format!("reopened after closing at snapshot {at}"));
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// Story count never grows during a session.
pub struct StoriesNeverReappear;

impl Invariant for StoriesNeverReappear {
    fn name(&self) -> &'static str {
        "StoriesNeverReappear"
    }

    fn check(&self, history: &PlaybackHistory) -> InvariantResult {
        for (i, pair) in history.snapshots.windows(2).enumerate() {
            let [before, after] = pair else { continue };
            if after.group_count > before.group_count {
                return violation(
                    self,
                    i + 1,
                    format!("group count grew {} → {}", before.group_count, after.group_count),
                );
            }
        }
        Ok(())
    }
}

/// Convenience for a single snapshot check.
pub fn check_snapshot(invariant: &dyn Invariant, snapshot: &ViewerSnapshot) -> InvariantResult {
    invariant.check(&PlaybackHistory::single(snapshot.clone()))
}
