//! Driver trait for abstracting story viewer I/O.
//!
//! The [`Driver`] trait decouples the story [`crate::Runtime`] from any
//! particular front end. The terminal UI implements it over crossterm and
//! ratatui; the simulation harness implements it over scripted queues and a
//! virtual clock.

use std::{future::Future, ops::Sub, time::Duration};

use glance_core::StoryId;

use crate::{StoryEvent, StoryViewer};

/// Platform I/O for the story runtime.
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Wait for the next user input.
    ///
    /// Returns `None` for input the viewer does not care about. The runtime
    /// races this against the frame timer, so implementations must be
    /// cancel-safe.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<StoryEvent<Self::Instant>>, Self::Error>> + Send;

    /// Ask the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Show a message the user must acknowledge.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be displayed.
    fn alert(&mut self, message: &str) -> Result<(), Self::Error>;

    /// Tell the feed that a story is gone.
    fn story_deleted(&mut self, story_id: &StoryId);

    /// Render the viewer.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, viewer: &StoryViewer<Self::Instant>) -> Result<(), Self::Error>;

    /// Tear down the viewer surface.
    fn stop(&mut self);
}

impl<D: Driver> Driver for &mut D {
    type Error = D::Error;
    type Instant = D::Instant;

    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<StoryEvent<Self::Instant>>, Self::Error>> + Send {
        (**self).poll_event()
    }

    fn confirm(&mut self, prompt: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        (**self).confirm(prompt)
    }

    fn alert(&mut self, message: &str) -> Result<(), Self::Error> {
        (**self).alert(message)
    }

    fn story_deleted(&mut self, story_id: &StoryId) {
        (**self).story_deleted(story_id);
    }

    fn render(&mut self, viewer: &StoryViewer<Self::Instant>) -> Result<(), Self::Error> {
        (**self).render(viewer)
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}
