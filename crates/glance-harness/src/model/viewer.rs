//! Reference story viewer.
//!
//! A deliberately naive re-statement of playback rules over plain integers.
//! No ticker, no timers, no effect round-trips: a delete completes in one
//! step. It is the oracle the real viewer is compared against.

use std::time::Duration;

use glance_app::StoryTiming;

use super::{ObservableState, Operation};

/// One author's stories in the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroup {
    /// Author ID.
    pub author: String,
    /// Story IDs in display order.
    pub stories: Vec<String>,
}

/// Model of a story viewer.
#[derive(Debug, Clone)]
pub struct ModelViewer {
    groups: Vec<ModelGroup>,
    current_user: Option<String>,
    timing: StoryTiming,
    group: usize,
    story: usize,
    closed: bool,
    paused: bool,
    now_ms: u64,
    elapsed_ms: u64,
    anchor_ms: Option<u64>,
    progress: f64,
    down_at_ms: Option<u64>,
}

impl ModelViewer {
    /// Open on the first story of `groups[initial]`.
    pub fn new(groups: Vec<ModelGroup>, initial: usize, current_user: Option<String>) -> Self {
        Self {
            groups,
            current_user,
            timing: StoryTiming::default(),
            group: initial,
            story: 0,
            closed: false,
            paused: false,
            now_ms: 0,
            elapsed_ms: 0,
            anchor_ms: None,
            progress: 0.0,
            down_at_ms: None,
        }
    }

    /// Model clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: Operation) {
        match op {
            Operation::Frame { millis } => {
                self.now_ms += u64::from(millis);
                self.frame();
            },
            Operation::Press => {
                if !self.closed {
                    self.paused = true;
                    self.down_at_ms = Some(self.now_ms);
                }
            },
            Operation::Release { right, held_millis } => {
                self.now_ms += u64::from(held_millis);
                if self.closed {
                    return;
                }
                self.paused = false;
                let threshold = self.timing.tap_threshold.as_millis() as u64;
                if let Some(down) = self.down_at_ms.take()
                    && self.now_ms - down < threshold
                {
                    if right { self.next() } else { self.prev() }
                }
            },
            Operation::Leave => {
                if !self.closed {
                    self.paused = false;
                    self.down_at_ms = None;
                }
            },
            Operation::Next => self.next(),
            Operation::Prev => self.prev(),
            Operation::Close => self.close(),
            Operation::Delete { confirm, row_fails, .. } => self.delete(confirm, row_fails),
        }
    }

    /// Observable state.
    pub fn observe(&self) -> ObservableState {
        let remaining = self.groups.iter().map(|g| g.stories.len()).sum();
        if self.closed {
            return ObservableState {
                position: None,
                story_id: None,
                progress: None,
                paused: false,
                remaining,
            };
        }
        ObservableState {
            position: Some((self.group, self.story)),
            story_id: self.groups.get(self.group).and_then(|g| g.stories.get(self.story)).cloned(),
            progress: Some(self.progress),
            paused: self.paused,
            remaining,
        }
    }

    fn frame(&mut self) {
        if self.closed {
            return;
        }
        if self.paused {
            self.anchor_ms = None;
            return;
        }
        if let Some(anchor) = self.anchor_ms {
            self.elapsed_ms += self.now_ms - anchor;
        }
        self.anchor_ms = Some(self.now_ms);

        let duration = self.timing.story_duration;
        if Duration::from_millis(self.elapsed_ms) >= duration {
            self.progress = 100.0;
            self.next();
        } else {
            self.progress =
                Duration::from_millis(self.elapsed_ms).as_secs_f64() / duration.as_secs_f64() * 100.0;
        }
    }

    fn next(&mut self) {
        if self.closed {
            return;
        }
        if self.story + 1 < self.group_len() {
            self.story += 1;
            self.restart();
        } else if self.group + 1 < self.groups.len() {
            self.group += 1;
            self.story = 0;
            self.restart();
        } else {
            self.close();
        }
    }

    fn prev(&mut self) {
        if self.closed {
            return;
        }
        if self.story > 0 {
            self.story -= 1;
            self.restart();
        } else if self.group > 0 {
            self.group -= 1;
            self.story = self.group_len().saturating_sub(1);
            self.restart();
        } else {
            self.elapsed_ms = 0;
            self.anchor_ms = None;
            self.progress = 0.0;
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.paused = false;
        self.down_at_ms = None;
    }

    fn delete(&mut self, confirm: bool, row_fails: bool) {
        if self.closed {
            return;
        }
        let owner = self.groups.get(self.group).map(|g| g.author.as_str());
        if owner.is_none() || owner != self.current_user.as_deref() {
            return;
        }

        // The prompt drops any active press
        self.down_at_ms = None;
        if !confirm || row_fails {
            self.paused = false;
            return;
        }

        // Closing leaves the local collection untouched
        if self.group_len() <= 1 {
            self.close();
            return;
        }

        if let Some(group) = self.groups.get_mut(self.group) {
            group.stories.remove(self.story);
        }
        if self.story >= self.group_len() {
            if self.group + 1 < self.groups.len() {
                self.group += 1;
                self.story = 0;
            } else {
                self.close();
                return;
            }
        }
        self.restart();
    }

    fn restart(&mut self) {
        self.elapsed_ms = 0;
        self.anchor_ms = None;
        self.progress = 0.0;
        self.paused = false;
    }

    fn group_len(&self) -> usize {
        self.groups.get(self.group).map_or(0, |g| g.stories.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelViewer {
        ModelViewer::new(
            vec![
                ModelGroup { author: "u0".into(), stories: vec!["a".into(), "b".into()] },
                ModelGroup { author: "u1".into(), stories: vec!["c".into()] },
            ],
            0,
            Some("u0".into()),
        )
    }

    #[test]
    fn next_walks_then_closes() {
        let mut m = model();
        m.apply(Operation::Next);
        m.apply(Operation::Next);
        assert_eq!(m.observe().story_id.as_deref(), Some("c"));

        m.apply(Operation::Next);
        assert_eq!(m.observe().position, None);
    }

    #[test]
    fn delete_then_lands_on_follower() {
        let mut m = model();
        m.apply(Operation::Delete { confirm: true, blob_fails: true, row_fails: false });

        let state = m.observe();
        assert_eq!(state.story_id.as_deref(), Some("b"));
        assert_eq!(state.remaining, 2);
    }

    #[test]
    fn delete_of_foreign_story_is_ignored() {
        let mut m = model();
        m.apply(Operation::Next);
        m.apply(Operation::Next);
        m.apply(Operation::Delete { confirm: true, blob_fails: false, row_fails: false });

        assert_eq!(m.observe().remaining, 3);
    }
}
