//! Real viewer wrapper mirroring [`ModelViewer`](super::ModelViewer)'s
//! interface.
//!
//! Each operation is translated into the event sequence the runtime would
//! produce, including effect completions and the delayed-advance timer, so
//! the real state machine can be compared step by step against the model.

use glance_app::{StoryAction, StoryEvent, StoryViewer, TapZone};
use glance_core::{GatewayError, Story, StoryGroup, StoryId, UserId};

use super::{ModelGroup, ObservableState, Operation};
use crate::{InvariantRegistry, PlaybackHistory, SimInstant, ViewerSnapshot, Violation};

/// Build matching model and real collections.
///
/// Group `i` is authored by `u{i}` and holds `max(sizes[i], 1)` stories
/// named `g{i}s{j}`.
pub fn build_groups(sizes: &[u8]) -> (Vec<ModelGroup>, Vec<StoryGroup>) {
    let mut model = Vec::with_capacity(sizes.len());
    let mut real = Vec::with_capacity(sizes.len());

    for (i, &size) in sizes.iter().enumerate() {
        let author = format!("u{i}");
        let ids: Vec<String> = (0..size.max(1)).map(|j| format!("g{i}s{j}")).collect();
        let stories = ids
            .iter()
            .map(|id| Story {
                id: StoryId::new(id.as_str()),
                author_id: UserId::new(author.as_str()),
                image_url: format!("https://cdn.example/storage/stories/{id}.jpg"),
                created_at_secs: 0,
                author: None,
            })
            .collect();

        real.push(StoryGroup::new(UserId::new(author.as_str()), stories));
        model.push(ModelGroup { author, stories: ids });
    }
    (model, real)
}

/// A real [`StoryViewer`] on a private virtual clock.
#[derive(Debug)]
pub struct RealViewer {
    viewer: StoryViewer<SimInstant>,
    now_ms: u64,
    history: PlaybackHistory,
}

impl RealViewer {
    /// Wrap an opened viewer.
    pub fn new(viewer: StoryViewer<SimInstant>) -> Self {
        let history = PlaybackHistory::single(ViewerSnapshot::capture(&viewer));
        Self { viewer, now_ms: 0, history }
    }

    /// Underlying viewer.
    pub fn viewer(&self) -> &StoryViewer<SimInstant> {
        &self.viewer
    }

    /// Snapshots after every operation.
    pub fn history(&self) -> &PlaybackHistory {
        &self.history
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: Operation) {
        match op {
            Operation::Frame { millis } => {
                self.now_ms += u64::from(millis);
                let now = self.now();
                self.viewer.handle(StoryEvent::Frame { now });
            },
            Operation::Press => {
                let now = self.now();
                self.viewer.handle(StoryEvent::PointerDown { now });
            },
            Operation::Release { right, held_millis } => {
                self.now_ms += u64::from(held_millis);
                let zone = if right { TapZone::Right } else { TapZone::Left };
                let now = self.now();
                self.viewer.handle(StoryEvent::PointerUp { now, zone });
            },
            Operation::Leave => {
                self.viewer.handle(StoryEvent::PointerLeave);
            },
            Operation::Next => {
                self.viewer.go_to_next();
            },
            Operation::Prev => {
                self.viewer.go_to_prev();
            },
            Operation::Close => {
                self.viewer.close();
            },
            Operation::Delete { confirm, blob_fails, row_fails } => {
                self.delete(confirm, blob_fails, row_fails);
            },
        }
        self.history.record(ViewerSnapshot::capture(&self.viewer));
    }

    /// Observable state, in the model's terms.
    pub fn observe(&self) -> ObservableState {
        let remaining = self.viewer.groups().iter().map(StoryGroup::len).sum();
        if self.viewer.is_closed() {
            return ObservableState {
                position: None,
                story_id: None,
                progress: None,
                paused: false,
                remaining,
            };
        }
        ObservableState {
            position: Some((self.viewer.group_index(), self.viewer.story_index())),
            story_id: self.viewer.current_story().map(|s| s.id.to_string()),
            progress: Some(self.viewer.progress()),
            paused: self.viewer.is_paused(),
            remaining,
        }
    }

    /// Run `registry` over everything seen so far.
    pub fn check(&self, registry: &InvariantRegistry) -> Result<(), Vec<Violation>> {
        registry.check_all(&self.history)
    }

    fn now(&self) -> SimInstant {
        SimInstant::from_millis(self.now_ms)
    }

    /// Drive the delete flow to completion, answering effects inline.
    fn delete(&mut self, confirm: bool, blob_fails: bool, row_fails: bool) {
        let mut pending = self.viewer.handle(StoryEvent::DeletePressed);

        while !pending.is_empty() {
            let actions = std::mem::take(&mut pending);
            for action in actions {
                let event = match action {
                    StoryAction::ConfirmDelete { .. } => {
                        StoryEvent::DeleteConfirmed { confirmed: confirm }
                    },
                    StoryAction::RemoveBlob { .. } => StoryEvent::BlobRemoved {
                        result: if blob_fails { Err(injected()) } else { Ok(()) },
                    },
                    StoryAction::DeleteRow { .. } => StoryEvent::RowDeleted {
                        result: if row_fails { Err(injected()) } else { Ok(()) },
                    },
                    // The delay elapses before the next operation
                    StoryAction::ScheduleTimer { token, .. } => StoryEvent::TimerFired { token },
                    StoryAction::Render
                    | StoryAction::Close
                    | StoryAction::StoryDeleted { .. }
                    | StoryAction::Alert { .. }
                    | StoryAction::CancelTimer { .. } => continue,
                };
                pending.extend(self.viewer.handle(event));
            }
        }
    }
}

fn injected() -> GatewayError {
    GatewayError::Transport(crate::chaotic::INJECTED_FAILURE.to_owned())
}
