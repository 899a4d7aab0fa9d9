//! Generic runtime for story playback.
//!
//! The Runtime drives the story event loop, coordinating between:
//! - [`StoryViewer`]: playback state machine
//! - [`Driver`]: platform-specific input and rendering
//! - the backend gateway, for the delete flow
//! - an [`Environment`], for frame pacing

use std::time::Duration;

use glance_core::{BlobStore, DataGateway, Environment, Table};

use crate::{Driver, FRAME_INTERVAL, StoryAction, StoryEvent, StoryViewer, TimerToken};

/// A delay requested by the viewer.
#[derive(Debug, Clone, Copy)]
struct PendingTimer<I> {
    token: TimerToken,
    scheduled_at: I,
    delay: Duration,
}

/// Generic runtime that orchestrates a [`StoryViewer`] with a [`Driver`].
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `G`: Backend used to delete stories
/// - `E`: Environment providing the clock and frame sleeps
pub struct Runtime<D, G, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    gateway: G,
    env: E,
    viewer: StoryViewer<D::Instant>,
    timer: Option<PendingTimer<D::Instant>>,
    frame_interval: Duration,
    last_frame: D::Instant,
}

impl<D, G, E> Runtime<D, G, E>
where
    D: Driver<Instant = E::Instant>,
    G: DataGateway + BlobStore,
    E: Environment,
{
    /// Create a runtime around an already-opened viewer.
    pub fn new(driver: D, gateway: G, env: E, viewer: StoryViewer<D::Instant>) -> Self {
        let last_frame = env.now();
        Self {
            driver,
            gateway,
            env,
            viewer,
            timer: None,
            frame_interval: FRAME_INTERVAL,
            last_frame,
        }
    }

    /// Override the frame interval.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Viewer state.
    pub fn viewer(&self) -> &StoryViewer<D::Instant> {
        &self.viewer
    }

    /// Driver, for inspection.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether a delayed action is waiting.
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Run until the viewer closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<StoryViewer<D::Instant>, D::Error> {
        self.driver.render(&self.viewer)?;

        loop {
            let closed = self.step().await?;
            if closed {
                break;
            }
        }

        self.driver.stop();
        Ok(self.viewer)
    }

    /// Process one cycle of the event loop.
    ///
    /// Waits for either one driver event or the end of the current frame
    /// interval. Once a full interval has passed since the last frame, a due
    /// timer fires and a frame is fed, whether or not an event arrived, so
    /// steady input cannot starve playback. Returns `true` once the viewer
    /// has closed.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        if self.viewer.is_closed() {
            return Ok(true);
        }

        let wait = self.frame_interval.saturating_sub(self.env.now() - self.last_frame);
        let polled = tokio::select! {
            biased;

            event = self.driver.poll_event() => Some(event?),
            () = self.env.sleep(wait) => None,
        };

        if let Some(Some(event)) = polled {
            let actions = self.viewer.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        let now = self.env.now();
        if now - self.last_frame < self.frame_interval {
            return Ok(false);
        }
        self.last_frame = now;

        if let Some(timer) = self.timer
            && now - timer.scheduled_at >= timer.delay
        {
            self.timer = None;
            let actions = self.viewer.handle(StoryEvent::TimerFired { token: timer.token });
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        let actions = self.viewer.handle(StoryEvent::Frame { now });
        self.process_actions(actions).await
    }

    /// Execute viewer actions, feeding effect results back in.
    ///
    /// Returns `true` if the viewer closed.
    async fn process_actions(&mut self, initial: Vec<StoryAction>) -> Result<bool, D::Error> {
        let mut pending = initial;

        while !pending.is_empty() {
            let actions = std::mem::take(&mut pending);

            for action in actions {
                match action {
                    StoryAction::Render => self.driver.render(&self.viewer)?,
                    StoryAction::Close => {
                        self.timer = None;
                        return Ok(true);
                    },
                    StoryAction::ConfirmDelete { story_id: _, prompt } => {
                        let confirmed = self.driver.confirm(prompt).await?;
                        pending.extend(self.viewer.handle(StoryEvent::DeleteConfirmed { confirmed }));
                    },
                    StoryAction::RemoveBlob { bucket, file_name } => {
                        let result = self.gateway.remove(bucket, &[file_name]).await;
                        pending.extend(self.viewer.handle(StoryEvent::BlobRemoved { result }));
                    },
                    StoryAction::DeleteRow { story_id } => {
                        let result = self.gateway.delete_row(Table::Stories, story_id.as_str()).await;
                        pending.extend(self.viewer.handle(StoryEvent::RowDeleted { result }));
                    },
                    StoryAction::StoryDeleted { story_id } => self.driver.story_deleted(&story_id),
                    StoryAction::Alert { message } => self.driver.alert(&message)?,
                    StoryAction::ScheduleTimer { token, delay } => {
                        self.timer =
                            Some(PendingTimer { token, scheduled_at: self.env.now(), delay });
                    },
                    StoryAction::CancelTimer { token } => {
                        if self.timer.is_some_and(|t| t.token == token) {
                            self.timer = None;
                        }
                    },
                }
            }
        }

        Ok(self.viewer.is_closed())
    }
}
