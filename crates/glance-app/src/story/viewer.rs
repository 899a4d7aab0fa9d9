//! Story viewer state machine.
//!
//! # Invariants
//!
//! - While open, `group_index < groups.len()` and `story_index` is in range
//!   for the current group.
//! - `is_deleting` implies `is_paused`.
//! - Every index change zeroes progress and the elapsed accumulator, clears
//!   the pause and delete flags, and cancels any outstanding timer.
//! - Once closed, every event is ignored.

use std::{ops::Sub, time::Duration};

use glance_core::{STORIES_BUCKET, Story, StoryGroup, StoryId, UserId};

use super::{
    DELETE_PROMPT, StoryAction, StoryError, StoryEvent, StoryTiming, TapZone, Ticker, TimerToken,
};

/// Full-screen story viewer.
///
/// Pure state machine generic over the clock's instant type. Feed it
/// [`StoryEvent`]s through [`StoryViewer::handle`] and execute the returned
/// [`StoryAction`]s.
#[derive(Debug, Clone)]
pub struct StoryViewer<I> {
    groups: Vec<StoryGroup>,
    group_index: usize,
    story_index: usize,
    progress: f64,
    paused: bool,
    deleting: bool,
    confirming: bool,
    closed: bool,
    ticker: Ticker<I>,
    /// Instant of the last pointer press. `None` when no press is active.
    pointer_down_at: Option<I>,
    current_user: Option<UserId>,
    timing: StoryTiming,
    /// Outstanding post-delete timer.
    timer: Option<TimerToken>,
    next_token: u64,
    /// Story whose deletion is in flight or awaiting the advance delay.
    pending_delete: Option<StoryId>,
}

impl<I> StoryViewer<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Open the viewer on the first story of `groups[initial_group_index]`.
    ///
    /// `current_user` gates the owner-only delete control.
    pub fn new(
        groups: Vec<StoryGroup>,
        initial_group_index: usize,
        current_user: Option<UserId>,
    ) -> Result<Self, StoryError> {
        Self::with_timing(groups, initial_group_index, current_user, StoryTiming::default())
    }

    /// Like [`StoryViewer::new`] with custom timings.
    pub fn with_timing(
        groups: Vec<StoryGroup>,
        initial_group_index: usize,
        current_user: Option<UserId>,
        timing: StoryTiming,
    ) -> Result<Self, StoryError> {
        if groups.is_empty() {
            return Err(StoryError::Empty);
        }
        if let Some(index) = groups.iter().position(StoryGroup::is_empty) {
            return Err(StoryError::EmptyGroup { index });
        }
        if initial_group_index >= groups.len() {
            return Err(StoryError::GroupOutOfRange {
                index: initial_group_index,
                len: groups.len(),
            });
        }

        Ok(Self {
            groups,
            group_index: initial_group_index,
            story_index: 0,
            progress: 0.0,
            paused: false,
            deleting: false,
            confirming: false,
            closed: false,
            ticker: Ticker::new(timing.story_duration),
            pointer_down_at: None,
            current_user,
            timing,
            timer: None,
            next_token: 0,
            pending_delete: None,
        })
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: StoryEvent<I>) -> Vec<StoryAction> {
        if self.closed {
            return vec![];
        }

        match event {
            StoryEvent::Frame { now } => self.on_frame(now),
            StoryEvent::PointerDown { now } => self.on_pointer_down(now),
            StoryEvent::PointerUp { now, zone } => self.on_pointer_up(now, zone),
            StoryEvent::PointerLeave => self.on_pointer_leave(),
            StoryEvent::ClosePressed => self.close(),
            StoryEvent::DeletePressed => self.request_delete(),
            StoryEvent::DeleteConfirmed { confirmed } => self.on_delete_confirmed(confirmed),
            StoryEvent::BlobRemoved { result } => self.on_blob_removed(result),
            StoryEvent::RowDeleted { result } => self.on_row_deleted(result),
            StoryEvent::TimerFired { token } => self.on_timer_fired(token),
        }
    }

    /// Advance to the next story, the next group, or close.
    pub fn go_to_next(&mut self) -> Vec<StoryAction> {
        let mut actions = Vec::new();
        self.next_into(&mut actions);
        actions
    }

    /// Step back one story, or to the last story of the previous group.
    ///
    /// On the very first story this only restarts the timer. Never closes.
    pub fn go_to_prev(&mut self) -> Vec<StoryAction> {
        if self.closed {
            return vec![];
        }

        let mut actions = Vec::new();
        if self.story_index > 0 {
            self.story_index -= 1;
            self.on_index_change(&mut actions);
        } else if self.group_index > 0 {
            self.group_index -= 1;
            self.story_index = self.current_group_len().saturating_sub(1);
            self.on_index_change(&mut actions);
        } else {
            self.ticker.reset();
            self.progress = 0.0;
            actions.push(StoryAction::Render);
        }
        actions
    }

    /// Dismiss the viewer.
    pub fn close(&mut self) -> Vec<StoryAction> {
        let mut actions = Vec::new();
        self.close_into(&mut actions);
        actions
    }

    /// Start the delete flow for the current story.
    ///
    /// Refused unless the current user owns the story. Opens a confirmation
    /// prompt and pauses playback until it is answered.
    pub fn request_delete(&mut self) -> Vec<StoryAction> {
        if self.closed || self.deleting || self.confirming {
            return vec![];
        }
        let Some(story_id) = self.current_story().map(|s| s.id.clone()) else {
            return vec![];
        };
        if !self.is_my_story() {
            tracing::warn!(story_id = %story_id, "refusing to delete a story owned by someone else");
            return vec![];
        }

        self.confirming = true;
        self.paused = true;
        self.pointer_down_at = None;
        vec![StoryAction::ConfirmDelete { story_id, prompt: DELETE_PROMPT }, StoryAction::Render]
    }

    /// Swap in a refreshed story collection.
    ///
    /// The current story keeps its position when it still exists. Otherwise
    /// the viewer lands on the story that took its place. Closes when nothing
    /// is left.
    pub fn replace_groups(&mut self, groups: Vec<StoryGroup>) -> Vec<StoryAction> {
        if self.closed {
            return vec![];
        }

        let current = self.current_story().map(|s| (s.id.clone(), s.author_id.clone()));
        self.groups = groups.into_iter().filter(|g| !g.is_empty()).collect();

        let mut actions = Vec::new();
        let Some((story_id, author_id)) = current else {
            self.settle_into(&mut actions);
            return actions;
        };

        let located = self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.stories().iter().position(|s| s.id == story_id).map(|si| (gi, si))
        });

        if let Some((gi, si)) = located {
            self.group_index = gi;
            self.story_index = si;
            actions.push(StoryAction::Render);
            return actions;
        }

        tracing::debug!(story_id = %story_id, "current story vanished after refresh");
        match self.groups.iter().position(|g| g.author_id() == &author_id) {
            Some(gi) => self.group_index = gi,
            None => self.story_index = 0,
        }
        self.settle_into(&mut actions);
        actions
    }

    /// Index of the current group.
    pub fn group_index(&self) -> usize {
        self.group_index
    }

    /// Index of the current story within its group.
    pub fn story_index(&self) -> usize {
        self.story_index
    }

    /// Progress of the current story, in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Playback is frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A delete is in flight.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// A delete confirmation prompt is open.
    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// The viewer has been dismissed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether animation frames are still needed.
    pub fn wants_frames(&self) -> bool {
        !self.closed
    }

    /// Outstanding timer token, if a delayed advance is scheduled.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer
    }

    /// All groups in display order.
    pub fn groups(&self) -> &[StoryGroup] {
        &self.groups
    }

    /// Current group.
    pub fn current_group(&self) -> Option<&StoryGroup> {
        self.groups.get(self.group_index)
    }

    /// Current story.
    pub fn current_story(&self) -> Option<&Story> {
        self.current_group().and_then(|g| g.get(self.story_index))
    }

    /// The signed-in user owns the current story.
    pub fn is_my_story(&self) -> bool {
        match (&self.current_user, self.current_story()) {
            (Some(user), Some(story)) => user == &story.author_id,
            _ => false,
        }
    }

    /// Whether the delete control should be offered.
    pub fn delete_control_visible(&self) -> bool {
        !self.closed && self.is_my_story()
    }

    /// Paused by the user rather than by a delete.
    pub fn pause_indicator_visible(&self) -> bool {
        self.paused && !self.deleting
    }

    /// Progress bar fill for each story of the current group.
    pub fn segments(&self) -> Vec<f64> {
        let len = self.current_group_len();
        (0..len)
            .map(|i| match i.cmp(&self.story_index) {
                std::cmp::Ordering::Less => 100.0,
                std::cmp::Ordering::Equal => self.progress,
                std::cmp::Ordering::Greater => 0.0,
            })
            .collect()
    }

    /// Timings in effect.
    pub fn timing(&self) -> StoryTiming {
        self.timing
    }

    fn on_frame(&mut self, now: I) -> Vec<StoryAction> {
        if self.paused || self.deleting {
            self.ticker.suspend();
            return vec![];
        }

        let tick = self.ticker.tick(now);
        self.progress = tick.progress;
        if tick.expired {
            let mut actions = vec![StoryAction::Render];
            self.next_into(&mut actions);
            return actions;
        }
        vec![StoryAction::Render]
    }

    fn on_pointer_down(&mut self, now: I) -> Vec<StoryAction> {
        if self.deleting || self.confirming {
            return vec![];
        }
        self.paused = true;
        self.pointer_down_at = Some(now);
        vec![StoryAction::Render]
    }

    fn on_pointer_up(&mut self, now: I, zone: TapZone) -> Vec<StoryAction> {
        if self.deleting || self.confirming {
            return vec![];
        }
        self.paused = false;

        let is_tap = self
            .pointer_down_at
            .take()
            .is_some_and(|down| now >= down && now - down < self.timing.tap_threshold);
        if !is_tap {
            return vec![StoryAction::Render];
        }

        match zone {
            TapZone::Left => self.go_to_prev(),
            TapZone::Right => self.go_to_next(),
        }
    }

    fn on_pointer_leave(&mut self) -> Vec<StoryAction> {
        if self.deleting || self.confirming {
            return vec![];
        }
        self.paused = false;
        self.pointer_down_at = None;
        vec![StoryAction::Render]
    }

    fn on_delete_confirmed(&mut self, confirmed: bool) -> Vec<StoryAction> {
        if !self.confirming {
            return vec![];
        }
        self.confirming = false;

        if !confirmed {
            self.paused = false;
            return vec![StoryAction::Render];
        }

        let Some(story) = self.current_story() else {
            self.paused = false;
            return vec![StoryAction::Render];
        };
        let story_id = story.id.clone();
        let file_name = story.blob_file_name().map(str::to_owned);

        self.deleting = true;
        self.paused = true;
        self.pending_delete = Some(story_id.clone());
        tracing::debug!(story_id = %story_id, "deleting story");

        let effect = match file_name {
            Some(file_name) => StoryAction::RemoveBlob { bucket: STORIES_BUCKET, file_name },
            None => StoryAction::DeleteRow { story_id },
        };
        vec![effect, StoryAction::Render]
    }

    fn on_blob_removed(&mut self, result: Result<(), glance_core::GatewayError>) -> Vec<StoryAction> {
        let Some(story_id) = self.pending_delete.clone().filter(|_| self.deleting) else {
            return vec![];
        };
        if let Err(error) = result {
            tracing::warn!(
                story_id = %story_id,
                %error,
                "story image removal failed, deleting row anyway"
            );
        }
        vec![StoryAction::DeleteRow { story_id }]
    }

    fn on_row_deleted(&mut self, result: Result<(), glance_core::GatewayError>) -> Vec<StoryAction> {
        let Some(story_id) = self.pending_delete.clone().filter(|_| self.deleting) else {
            return vec![];
        };

        if let Err(error) = result {
            tracing::error!(story_id = %story_id, %error, "story delete failed");
            self.deleting = false;
            self.paused = false;
            self.pending_delete = None;
            return vec![
                StoryAction::Alert { message: format!("Delete failed: {error}") },
                StoryAction::Render,
            ];
        }

        let mut actions = vec![StoryAction::StoryDeleted { story_id }];
        if self.current_group_len() <= 1 {
            self.close_into(&mut actions);
            return actions;
        }

        let token = TimerToken::new(self.next_token);
        self.next_token += 1;
        self.timer = Some(token);
        actions.push(StoryAction::ScheduleTimer { token, delay: self.timing.delete_advance_delay });
        actions
    }

    fn on_timer_fired(&mut self, token: TimerToken) -> Vec<StoryAction> {
        if self.timer != Some(token) {
            return vec![];
        }
        self.timer = None;

        if let Some(story_id) = self.pending_delete.take()
            && let Some(group) = self.groups.get_mut(self.group_index)
        {
            group.remove(&story_id);
            if group.is_empty() {
                self.groups.remove(self.group_index);
                self.story_index = 0;
            }
        }

        let mut actions = Vec::new();
        self.settle_into(&mut actions);
        actions
    }

    fn next_into(&mut self, actions: &mut Vec<StoryAction>) {
        if self.closed {
            return;
        }

        if self.story_index + 1 < self.current_group_len() {
            self.story_index += 1;
            self.on_index_change(actions);
        } else if self.group_index + 1 < self.groups.len() {
            self.group_index += 1;
            self.story_index = 0;
            self.on_index_change(actions);
        } else {
            self.close_into(actions);
        }
    }

    /// Land on the first valid position at or after the current indices.
    fn settle_into(&mut self, actions: &mut Vec<StoryAction>) {
        while let Some(group) = self.groups.get(self.group_index) {
            if self.story_index < group.len() {
                self.on_index_change(actions);
                return;
            }
            self.group_index += 1;
            self.story_index = 0;
        }
        self.close_into(actions);
    }

    fn on_index_change(&mut self, actions: &mut Vec<StoryAction>) {
        self.ticker.reset();
        self.progress = 0.0;
        self.paused = false;
        self.deleting = false;
        self.confirming = false;
        self.pending_delete = None;
        self.cancel_timer(actions);
        tracing::debug!(group = self.group_index, story = self.story_index, "story changed");
        actions.push(StoryAction::Render);
    }

    fn close_into(&mut self, actions: &mut Vec<StoryAction>) {
        if self.closed {
            return;
        }
        self.cancel_timer(actions);
        self.closed = true;
        self.paused = false;
        self.deleting = false;
        self.confirming = false;
        self.pending_delete = None;
        self.pointer_down_at = None;
        self.ticker.reset();
        tracing::debug!("story viewer closed");
        actions.push(StoryAction::Close);
    }

    fn cancel_timer(&mut self, actions: &mut Vec<StoryAction>) {
        if let Some(token) = self.timer.take() {
            actions.push(StoryAction::CancelTimer { token });
        }
    }

    fn current_group_len(&self) -> usize {
        self.current_group().map_or(0, StoryGroup::len)
    }
}

#[cfg(test)]
mod tests {
    use glance_core::GatewayError;

    use super::*;
    use crate::DELETE_ADVANCE_DELAY;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl Sub for Ms {
        type Output = Duration;
        fn sub(self, rhs: Self) -> Duration {
            Duration::from_millis(self.0.saturating_sub(rhs.0))
        }
    }

    fn story(id: &str, author: &str) -> Story {
        Story {
            id: StoryId::new(id),
            author_id: UserId::new(author),
            image_url: format!("https://cdn.example/stories/{id}.jpg"),
            created_at_secs: 0,
            author: None,
        }
    }

    fn group(author: &str, ids: &[&str]) -> StoryGroup {
        StoryGroup::new(UserId::new(author), ids.iter().map(|id| story(id, author)).collect())
    }

    /// Alice has two stories, Bob has one.
    fn viewer(user: Option<&str>) -> StoryViewer<Ms> {
        StoryViewer::new(
            vec![group("alice", &["a1", "a2"]), group("bob", &["b1"])],
            0,
            user.map(UserId::new),
        )
        .unwrap()
    }

    fn current_id<I: Copy + Ord + Sub<Output = Duration>>(v: &StoryViewer<I>) -> &str {
        v.current_story().unwrap().id.as_str()
    }

    fn tap(v: &mut StoryViewer<Ms>, at: u64, zone: TapZone) -> Vec<StoryAction> {
        v.handle(StoryEvent::PointerDown { now: Ms(at) });
        v.handle(StoryEvent::PointerUp { now: Ms(at + 50), zone })
    }

    fn confirm_delete(v: &mut StoryViewer<Ms>) -> Vec<StoryAction> {
        v.handle(StoryEvent::DeletePressed);
        v.handle(StoryEvent::DeleteConfirmed { confirmed: true })
    }

    fn scheduled_token(actions: &[StoryAction]) -> TimerToken {
        actions
            .iter()
            .find_map(|a| match a {
                StoryAction::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn construction_rejects_bad_collections() {
        assert_eq!(StoryViewer::<Ms>::new(vec![], 0, None).unwrap_err(), StoryError::Empty);

        let with_empty = vec![group("alice", &["a1"]), StoryGroup::new(UserId::new("bob"), vec![])];
        assert_eq!(
            StoryViewer::<Ms>::new(with_empty, 0, None).unwrap_err(),
            StoryError::EmptyGroup { index: 1 }
        );

        assert_eq!(
            StoryViewer::<Ms>::new(vec![group("alice", &["a1"])], 1, None).unwrap_err(),
            StoryError::GroupOutOfRange { index: 1, len: 1 }
        );
    }

    #[test]
    fn opens_on_first_story_of_initial_group() {
        let v = StoryViewer::<Ms>::new(vec![group("alice", &["a1"]), group("bob", &["b1"])], 1, None)
            .unwrap();

        assert_eq!(v.group_index(), 1);
        assert_eq!(v.story_index(), 0);
        assert_eq!(v.progress(), 0.0);
    }

    #[test]
    fn auto_advance_walks_every_story_then_closes() {
        let mut v = viewer(None);
        let mut now = 0;
        let mut visited = vec![current_id(&v).to_owned()];

        let mut closed = false;
        for _ in 0..2000 {
            let actions = v.handle(StoryEvent::Frame { now: Ms(now) });
            now += 16;
            if actions.contains(&StoryAction::Close) {
                closed = true;
                break;
            }
            let id = current_id(&v).to_owned();
            if visited.last() != Some(&id) {
                visited.push(id);
            }
        }

        assert!(closed);
        assert!(v.is_closed());
        assert_eq!(visited, ["a1", "a2", "b1"]);
    }

    #[test]
    fn expiring_frame_advances_and_resets_progress() {
        let mut v = viewer(None);
        v.handle(StoryEvent::Frame { now: Ms(0) });
        v.handle(StoryEvent::Frame { now: Ms(4_000) });
        assert!((v.progress() - 80.0).abs() < 1e-9);

        let actions = v.handle(StoryEvent::Frame { now: Ms(5_000) });

        assert_eq!(current_id(&v), "a2");
        assert_eq!(v.progress(), 0.0);
        assert!(actions.contains(&StoryAction::Render));
    }

    #[test]
    fn hold_pauses_without_navigation() {
        let mut v = viewer(None);
        v.handle(StoryEvent::Frame { now: Ms(0) });
        v.handle(StoryEvent::Frame { now: Ms(1_000) });

        v.handle(StoryEvent::PointerDown { now: Ms(1_000) });
        assert!(v.is_paused());
        assert!(v.pause_indicator_visible());

        // Long hold: frames do not advance progress
        v.handle(StoryEvent::Frame { now: Ms(3_000) });
        v.handle(StoryEvent::Frame { now: Ms(6_000) });
        assert!((v.progress() - 20.0).abs() < 1e-9);

        v.handle(StoryEvent::PointerUp { now: Ms(6_000), zone: TapZone::Right });
        assert!(!v.is_paused());
        assert_eq!(current_id(&v), "a1");

        // Resumes from the frozen accumulator
        v.handle(StoryEvent::Frame { now: Ms(6_016) });
        v.handle(StoryEvent::Frame { now: Ms(7_016) });
        assert!((v.progress() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn tap_right_and_left_navigate() {
        let mut v = viewer(None);

        tap(&mut v, 0, TapZone::Right);
        assert_eq!(current_id(&v), "a2");

        tap(&mut v, 100, TapZone::Right);
        assert_eq!(current_id(&v), "b1");
        assert_eq!(v.group_index(), 1);

        tap(&mut v, 200, TapZone::Left);
        assert_eq!((v.group_index(), v.story_index()), (0, 1));
    }

    #[test]
    fn tap_threshold_is_exclusive() {
        let mut v = viewer(None);
        v.handle(StoryEvent::PointerDown { now: Ms(0) });
        v.handle(StoryEvent::PointerUp { now: Ms(200), zone: TapZone::Right });

        assert_eq!(current_id(&v), "a1");
    }

    #[test]
    fn release_without_press_only_unpauses() {
        let mut v = viewer(None);
        let actions = v.handle(StoryEvent::PointerUp { now: Ms(10), zone: TapZone::Right });

        assert_eq!(actions, vec![StoryAction::Render]);
        assert_eq!(current_id(&v), "a1");
    }

    #[test]
    fn prev_on_first_story_restarts_timer() {
        let mut v = viewer(None);
        v.handle(StoryEvent::Frame { now: Ms(0) });
        v.handle(StoryEvent::Frame { now: Ms(2_000) });

        let actions = v.go_to_prev();

        assert!(!actions.contains(&StoryAction::Close));
        assert!(!v.is_closed());
        assert_eq!((v.group_index(), v.story_index()), (0, 0));
        assert_eq!(v.progress(), 0.0);
    }

    #[test]
    fn next_on_last_story_closes() {
        let mut v = viewer(None);
        v.go_to_next();
        v.go_to_next();

        let actions = v.go_to_next();

        assert_eq!(actions, vec![StoryAction::Close]);
        assert!(v.is_closed());
        assert!(!v.wants_frames());
    }

    #[test]
    fn closed_viewer_ignores_everything() {
        let mut v = viewer(Some("alice"));
        v.close();

        assert!(v.handle(StoryEvent::Frame { now: Ms(10_000) }).is_empty());
        assert!(tap(&mut v, 0, TapZone::Right).is_empty());
        assert!(v.handle(StoryEvent::DeletePressed).is_empty());
        assert!(v.go_to_next().is_empty());
        assert!(v.close().is_empty());
    }

    #[test]
    fn segments_fill_viewed_current_upcoming() {
        let mut v = StoryViewer::<Ms>::new(vec![group("alice", &["a1", "a2", "a3"])], 0, None).unwrap();
        v.go_to_next();
        v.handle(StoryEvent::Frame { now: Ms(0) });
        v.handle(StoryEvent::Frame { now: Ms(2_500) });

        let segments = v.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], 100.0);
        assert!((segments[1] - 50.0).abs() < 1e-9);
        assert_eq!(segments[2], 0.0);
    }

    #[test]
    fn delete_refused_for_non_owner() {
        let mut v = viewer(Some("bob"));

        assert!(!v.delete_control_visible());
        assert!(v.request_delete().is_empty());
        assert!(!v.is_confirming());
        assert!(!v.is_paused());
    }

    #[test]
    fn delete_refused_when_signed_out() {
        let mut v = viewer(None);
        assert!(v.request_delete().is_empty());
    }

    #[test]
    fn delete_prompt_pauses_and_blocks_pointer() {
        let mut v = viewer(Some("alice"));

        let actions = v.request_delete();
        assert_eq!(
            actions[0],
            StoryAction::ConfirmDelete { story_id: StoryId::new("a1"), prompt: DELETE_PROMPT }
        );
        assert!(v.is_paused());
        assert!(v.is_confirming());

        assert!(tap(&mut v, 0, TapZone::Right).is_empty());
        assert_eq!(current_id(&v), "a1");
    }

    #[test]
    fn declined_delete_resumes() {
        let mut v = viewer(Some("alice"));
        v.request_delete();

        let actions = v.handle(StoryEvent::DeleteConfirmed { confirmed: false });

        assert_eq!(actions, vec![StoryAction::Render]);
        assert!(!v.is_paused());
        assert!(!v.is_deleting());
        assert_eq!(current_id(&v), "a1");
    }

    #[test]
    fn confirmed_delete_removes_blob_then_row() {
        let mut v = viewer(Some("alice"));

        let actions = confirm_delete(&mut v);
        assert_eq!(
            actions[0],
            StoryAction::RemoveBlob { bucket: STORIES_BUCKET, file_name: "a1.jpg".to_owned() }
        );
        assert!(v.is_deleting());
        assert!(v.is_paused());
        assert!(!v.pause_indicator_visible());

        let actions = v.handle(StoryEvent::BlobRemoved { result: Ok(()) });
        assert_eq!(actions, vec![StoryAction::DeleteRow { story_id: StoryId::new("a1") }]);
    }

    #[test]
    fn blob_failure_is_not_fatal() {
        let mut v = viewer(Some("alice"));
        confirm_delete(&mut v);

        let actions = v.handle(StoryEvent::BlobRemoved {
            result: Err(GatewayError::Transport("offline".into())),
        });

        assert_eq!(actions, vec![StoryAction::DeleteRow { story_id: StoryId::new("a1") }]);
        assert!(v.is_deleting());
    }

    #[test]
    fn missing_blob_name_skips_blob_removal() {
        let mut s = story("a1", "alice");
        s.image_url = "https://cdn.example/stories/".into();
        let mut v = StoryViewer::<Ms>::new(
            vec![StoryGroup::new(UserId::new("alice"), vec![s])],
            0,
            Some(UserId::new("alice")),
        )
        .unwrap();

        let actions = confirm_delete(&mut v);
        assert_eq!(actions[0], StoryAction::DeleteRow { story_id: StoryId::new("a1") });
    }

    #[test]
    fn row_failure_alerts_and_rolls_back() {
        let mut v = viewer(Some("alice"));
        confirm_delete(&mut v);
        v.handle(StoryEvent::BlobRemoved { result: Ok(()) });

        let actions = v.handle(StoryEvent::RowDeleted {
            result: Err(GatewayError::Remote { code: "500".into(), message: "boom".into() }),
        });

        assert!(matches!(
            &actions[0],
            StoryAction::Alert { message } if message.starts_with("Delete failed: ")
        ));
        assert!(!v.is_deleting());
        assert!(!v.is_paused());
        assert_eq!(current_id(&v), "a1");
        assert_eq!(v.groups()[0].len(), 2);
    }

    #[test]
    fn deleting_one_of_several_advances_after_delay() {
        let mut v = viewer(Some("alice"));
        confirm_delete(&mut v);
        v.handle(StoryEvent::BlobRemoved { result: Ok(()) });

        let actions = v.handle(StoryEvent::RowDeleted { result: Ok(()) });
        assert_eq!(actions[0], StoryAction::StoryDeleted { story_id: StoryId::new("a1") });
        assert!(matches!(
            actions[1],
            StoryAction::ScheduleTimer { delay, .. } if delay == DELETE_ADVANCE_DELAY
        ));
        assert!(!v.is_closed());

        // Frames during the delay do nothing
        assert!(v.handle(StoryEvent::Frame { now: Ms(50) }).is_empty());

        let token = scheduled_token(&actions);
        v.handle(StoryEvent::TimerFired { token });

        assert_eq!(current_id(&v), "a2");
        assert_eq!(v.groups()[0].len(), 1);
        assert!(!v.is_deleting());
        assert!(!v.is_paused());
        assert!(!v.is_closed());
    }

    #[test]
    fn deleting_last_of_group_moves_to_next_group() {
        let mut v = viewer(Some("alice"));
        v.go_to_next();
        confirm_delete(&mut v);
        v.handle(StoryEvent::BlobRemoved { result: Ok(()) });
        let actions = v.handle(StoryEvent::RowDeleted { result: Ok(()) });

        v.handle(StoryEvent::TimerFired { token: scheduled_token(&actions) });

        assert_eq!(current_id(&v), "b1");
        assert_eq!(v.group_index(), 1);
    }

    #[test]
    fn deleting_single_story_group_closes() {
        let mut v = StoryViewer::<Ms>::new(
            vec![group("alice", &["a1"]), group("bob", &["b1"])],
            0,
            Some(UserId::new("alice")),
        )
        .unwrap();
        confirm_delete(&mut v);
        v.handle(StoryEvent::BlobRemoved { result: Ok(()) });

        let actions = v.handle(StoryEvent::RowDeleted { result: Ok(()) });

        assert_eq!(
            actions,
            vec![
                StoryAction::StoryDeleted { story_id: StoryId::new("a1") },
                StoryAction::Close
            ]
        );
        assert!(v.is_closed());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut v = viewer(Some("alice"));
        confirm_delete(&mut v);
        v.handle(StoryEvent::BlobRemoved { result: Ok(()) });
        let actions = v.handle(StoryEvent::RowDeleted { result: Ok(()) });
        let token = scheduled_token(&actions);

        let closing = v.close();
        assert_eq!(closing, vec![StoryAction::CancelTimer { token }, StoryAction::Close]);
        assert!(v.handle(StoryEvent::TimerFired { token }).is_empty());
        assert!(v.handle(StoryEvent::TimerFired { token: TimerToken::new(99) }).is_empty());
    }

    #[test]
    fn duplicate_completions_are_ignored() {
        let mut v = viewer(Some("alice"));
        assert!(v.handle(StoryEvent::RowDeleted { result: Ok(()) }).is_empty());
        assert!(v.handle(StoryEvent::BlobRemoved { result: Ok(()) }).is_empty());
        assert!(v.handle(StoryEvent::DeleteConfirmed { confirmed: true }).is_empty());
    }

    #[test]
    fn replace_groups_keeps_current_story() {
        let mut v = viewer(None);
        v.go_to_next();

        v.replace_groups(vec![group("carol", &["c1"]), group("alice", &["a1", "a2"])]);

        assert_eq!(current_id(&v), "a2");
        assert_eq!(v.group_index(), 1);
    }

    #[test]
    fn replace_groups_lands_on_successor_when_current_vanishes() {
        let mut v = viewer(None);

        v.replace_groups(vec![group("alice", &["a2"]), group("bob", &["b1"])]);
        assert_eq!(current_id(&v), "a2");

        v.replace_groups(vec![group("bob", &["b1"])]);
        assert_eq!(current_id(&v), "b1");
        assert_eq!(v.group_index(), 0);
    }

    #[test]
    fn replace_groups_with_nothing_closes() {
        let mut v = viewer(None);
        let actions = v.replace_groups(vec![]);

        assert_eq!(actions, vec![StoryAction::Close]);
        assert!(v.is_closed());
    }

    #[test]
    fn custom_timing_applies() {
        let timing = StoryTiming {
            story_duration: Duration::from_millis(100),
            tap_threshold: Duration::from_millis(10),
            delete_advance_delay: Duration::from_millis(1),
        };
        let mut v = StoryViewer::with_timing(vec![group("alice", &["a1", "a2"])], 0, None, timing)
            .unwrap();
        v.handle(StoryEvent::Frame { now: Ms(0) });
        v.handle(StoryEvent::Frame { now: Ms(100) });

        assert_eq!(current_id(&v), "a2");
        assert_eq!(v.timing(), timing);
    }
}
