//! Story viewer side-effects.
//!
//! [`StoryAction`] values are instructions for the runtime. The viewer never
//! performs I/O itself; results come back as [`crate::StoryEvent`]s.

use std::time::Duration;

use glance_core::StoryId;

use crate::story::TimerToken;

/// Actions produced by the story viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryAction {
    /// Redraw the viewer.
    Render,

    /// Dismiss the viewer. No further actions follow.
    Close,

    /// Ask the user to confirm deleting a story.
    ConfirmDelete {
        /// Story awaiting confirmation.
        story_id: StoryId,
        /// Prompt text to show.
        prompt: &'static str,
    },

    /// Remove a story's image from blob storage.
    RemoveBlob {
        /// Storage bucket.
        bucket: &'static str,
        /// File name within the bucket.
        file_name: String,
    },

    /// Delete the story row from the backend.
    DeleteRow {
        /// Story to delete.
        story_id: StoryId,
    },

    /// Tell the owning feed a story is gone so it can refresh.
    StoryDeleted {
        /// Deleted story.
        story_id: StoryId,
    },

    /// Show a blocking message to the user.
    Alert {
        /// Message text.
        message: String,
    },

    /// Deliver [`crate::StoryEvent::TimerFired`] after `delay`.
    ScheduleTimer {
        /// Token to echo back.
        token: TimerToken,
        /// Delay from now.
        delay: Duration,
    },

    /// Drop a previously scheduled timer.
    CancelTimer {
        /// Token of the timer to drop.
        token: TimerToken,
    },
}
