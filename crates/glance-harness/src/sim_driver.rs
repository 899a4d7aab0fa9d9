//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`glance_app::Runtime`] orchestration code runs in both production and
//! simulation.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use glance_app::{Driver, StoryEvent, StoryViewer, TapZone};
use glance_core::{Environment, StoryId};

use crate::{InvariantRegistry, PlaybackHistory, SimEnv, SimInstant, ViewerSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimDriverError {
    /// A rendered state broke an invariant.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

/// Shared state for event injection and observation.
#[derive(Default)]
struct SharedState {
    pending_events: VecDeque<StoryEvent<SimInstant>>,
    confirm_answers: VecDeque<bool>,
    prompts: Vec<String>,
    alerts: Vec<String>,
    deleted: Vec<StoryId>,
    history: PlaybackHistory,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Clones share state, so a test can keep a handle while the runtime owns
/// the driver.
#[derive(Clone)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    env: SimEnv,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a driver reading time from `env`.
    pub fn new(env: SimEnv) -> Self {
        Self { state: Arc::new(Mutex::new(SharedState::default())), env, invariants: None }
    }

    /// Check invariants on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an event.
    pub fn inject_event(&self, event: StoryEvent<SimInstant>) {
        self.lock().pending_events.push_back(event);
    }

    /// Queue a press and an immediate release on `zone`.
    pub fn inject_tap(&self, zone: TapZone) {
        self.inject_press(zone, Duration::ZERO);
    }

    /// Queue a press held for `held` before release on `zone`.
    pub fn inject_press(&self, zone: TapZone, held: Duration) {
        let now = self.env.now();
        let mut state = self.lock();
        state.pending_events.push_back(StoryEvent::PointerDown { now });
        state.pending_events.push_back(StoryEvent::PointerUp { now: now + held, zone });
    }

    /// Queue the answer to the next confirmation prompt.
    ///
    /// Unanswered prompts are declined.
    pub fn answer_confirm(&self, confirmed: bool) {
        self.lock().confirm_answers.push_back(confirmed);
    }

    /// Check if there are queued events.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Alerts shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    /// Stories reported deleted so far.
    pub fn deleted(&self) -> Vec<StoryId> {
        self.lock().deleted.clone()
    }

    /// Number of renders.
    pub fn render_count(&self) -> usize {
        self.lock().history.snapshots.len()
    }

    /// Every rendered state, oldest first.
    pub fn history(&self) -> PlaybackHistory {
        self.lock().history.clone()
    }

    /// Last rendered state.
    pub fn last_render(&self) -> Option<ViewerSnapshot> {
        self.lock().history.latest().cloned()
    }

    /// `stop` was called.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = SimInstant;

    async fn poll_event(&mut self) -> Result<Option<StoryEvent<SimInstant>>, Self::Error> {
        let next = self.lock().pending_events.pop_front();
        match next {
            Some(event) => Ok(Some(event)),
            // Nothing scripted: let the frame timer win
            None => std::future::pending().await,
        }
    }

    async fn confirm(&mut self, prompt: &str) -> Result<bool, Self::Error> {
        let mut state = self.lock();
        state.prompts.push(prompt.to_owned());
        Ok(state.confirm_answers.pop_front().unwrap_or(false))
    }

    fn alert(&mut self, message: &str) -> Result<(), Self::Error> {
        self.lock().alerts.push(message.to_owned());
        Ok(())
    }

    fn story_deleted(&mut self, story_id: &StoryId) {
        self.lock().deleted.push(story_id.clone());
    }

    fn render(&mut self, viewer: &StoryViewer<SimInstant>) -> Result<(), Self::Error> {
        let mut state = self.lock();
        state.history.record(ViewerSnapshot::capture(viewer));

        if let Some(registry) = &self.invariants
            && let Err(violations) = registry.check_all(&state.history)
        {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            return Err(SimDriverError::Invariant(messages.join("; ")));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_event_queues_event() {
        let driver = SimDriver::new(SimEnv::new());
        driver.inject_event(StoryEvent::PointerLeave);

        assert!(driver.has_pending());
    }

    #[test]
    fn tap_queues_press_and_release() {
        let env = SimEnv::new();
        env.advance(Duration::from_millis(40));
        let driver = SimDriver::new(env);
        driver.inject_tap(TapZone::Left);

        let state = driver.lock();
        assert_eq!(state.pending_events.len(), 2);
        assert!(matches!(
            state.pending_events[1],
            StoryEvent::PointerUp { now, zone: TapZone::Left } if now == SimInstant::from_millis(40)
        ));
    }

    #[tokio::test]
    async fn unanswered_confirm_declines() {
        let mut driver = SimDriver::new(SimEnv::new());
        driver.answer_confirm(true);

        assert!(driver.confirm("first?").await.unwrap());
        assert!(!driver.confirm("second?").await.unwrap());
        assert_eq!(driver.prompts(), ["first?", "second?"]);
    }
}
