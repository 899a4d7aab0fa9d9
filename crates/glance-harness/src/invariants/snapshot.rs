//! Observable viewer state for invariant checking.
//!
//! Snapshots capture what a [`StoryViewer`] exposes at one point in time.
//! Invariants operate on snapshots rather than live state so every check
//! sees one consistent view.

use std::{ops::Sub, time::Duration};

use glance_app::StoryViewer;
use serde::Serialize;

/// Observable state of a story viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerSnapshot {
    /// Current group index.
    pub group_index: usize,
    /// Current story index within the group.
    pub story_index: usize,
    /// Number of groups.
    pub group_count: usize,
    /// Stories in the current group. 0 if the group index is out of range.
    pub group_len: usize,
    /// Current story ID, if any.
    pub story_id: Option<String>,
    /// Progress of the current story.
    pub progress: f64,
    /// Progress bar fills for the current group.
    pub segments: Vec<f64>,
    /// Playback frozen.
    pub paused: bool,
    /// Delete in flight.
    pub deleting: bool,
    /// Confirmation prompt open.
    pub confirming: bool,
    /// Viewer dismissed.
    pub closed: bool,
    /// Delayed advance scheduled.
    pub pending_timer: bool,
}

impl ViewerSnapshot {
    /// Capture a viewer.
    pub fn capture<I>(viewer: &StoryViewer<I>) -> Self
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        Self {
            group_index: viewer.group_index(),
            story_index: viewer.story_index(),
            group_count: viewer.groups().len(),
            group_len: viewer.current_group().map_or(0, glance_core::StoryGroup::len),
            story_id: viewer.current_story().map(|s| s.id.to_string()),
            progress: viewer.progress(),
            segments: viewer.segments(),
            paused: viewer.is_paused(),
            deleting: viewer.is_deleting(),
            confirming: viewer.is_confirming(),
            closed: viewer.is_closed(),
            pending_timer: viewer.pending_timer().is_some(),
        }
    }
}

/// Ordered sequence of snapshots from one playback session.
#[derive(Debug, Clone, Default)]
pub struct PlaybackHistory {
    /// Snapshots, oldest first.
    pub snapshots: Vec<ViewerSnapshot>,
}

impl PlaybackHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History holding a single snapshot.
    pub fn single(snapshot: ViewerSnapshot) -> Self {
        Self { snapshots: vec![snapshot] }
    }

    /// Append a snapshot.
    pub fn record(&mut self, snapshot: ViewerSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&ViewerSnapshot> {
        self.snapshots.last()
    }
}

#[cfg(test)]
mod tests {
    use glance_app::StoryEvent;
    use glance_core::{Story, StoryGroup, StoryId, UserId};

    use super::*;
    use crate::SimInstant;

    #[test]
    fn capture_reflects_viewer() {
        let story = Story {
            id: StoryId::new("s1"),
            author_id: UserId::new("alice"),
            image_url: "https://cdn.example/stories/s1.jpg".into(),
            created_at_secs: 0,
            author: None,
        };
        let mut viewer = StoryViewer::<SimInstant>::new(
            vec![StoryGroup::new(UserId::new("alice"), vec![story])],
            0,
            None,
        )
        .unwrap();
        viewer.handle(StoryEvent::PointerDown { now: SimInstant::from_millis(0) });

        let snapshot = ViewerSnapshot::capture(&viewer);

        assert_eq!(snapshot.story_id.as_deref(), Some("s1"));
        assert_eq!(snapshot.group_len, 1);
        assert!(snapshot.paused);
        assert!(!snapshot.closed);
    }

    #[test]
    fn history_tracks_latest() {
        let mut history = PlaybackHistory::new();
        assert!(history.latest().is_none());

        let snapshot = ViewerSnapshot {
            group_index: 0,
            story_index: 0,
            group_count: 1,
            group_len: 1,
            story_id: None,
            progress: 0.0,
            segments: vec![0.0],
            paused: false,
            deleting: false,
            confirming: false,
            closed: false,
            pending_timer: false,
        };
        history.record(snapshot.clone());
        assert_eq!(history.latest(), Some(&snapshot));
    }
}
