//! Story playback.
//!
//! [`StoryViewer`] is a pure state machine over a collection of
//! [`glance_core::StoryGroup`]s: it consumes [`StoryEvent`]s and produces
//! [`StoryAction`]s. Time enters only through the instants carried by
//! events, so playback is fully deterministic under a virtual clock.

mod action;
mod event;
mod ticker;
mod viewer;

use std::time::Duration;

pub use action::StoryAction;
pub use event::{StoryEvent, TapZone, TimerToken};
pub use ticker::{Tick, Ticker};
pub use viewer::StoryViewer;

/// How long each story is shown.
pub const STORY_DURATION: Duration = Duration::from_millis(5000);

/// Press shorter than this is a tap; longer is a hold.
pub const TAP_THRESHOLD: Duration = Duration::from_millis(200);

/// Pause between a successful delete and moving on.
pub const DELETE_ADVANCE_DELAY: Duration = Duration::from_millis(100);

/// Animation frame interval used by the runtime.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Confirmation prompt shown before deleting a story.
pub const DELETE_PROMPT: &str = "Delete this story permanently?";

/// Timing knobs for a [`StoryViewer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryTiming {
    /// Display duration of each story.
    pub story_duration: Duration,
    /// Maximum press length that still counts as a tap.
    pub tap_threshold: Duration,
    /// Delay before advancing after a delete.
    pub delete_advance_delay: Duration,
}

impl Default for StoryTiming {
    fn default() -> Self {
        Self {
            story_duration: STORY_DURATION,
            tap_threshold: TAP_THRESHOLD,
            delete_advance_delay: DELETE_ADVANCE_DELAY,
        }
    }
}

/// Invalid story collection handed to [`StoryViewer::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryError {
    /// No groups at all.
    #[error("story collection is empty")]
    Empty,

    /// A group without stories.
    #[error("story group {index} has no stories")]
    EmptyGroup {
        /// Position of the offending group.
        index: usize,
    },

    /// Starting group index past the end.
    #[error("initial group index {index} out of range for {len} groups")]
    GroupOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of groups.
        len: usize,
    },
}
