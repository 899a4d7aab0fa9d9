//! Story viewer input events.
//!
//! [`StoryEvent`] covers everything that can move the viewer: animation
//! frames, pointer gestures, the close and delete controls, and completions
//! of effects the runtime executed on the viewer's behalf.

use glance_core::GatewayError;

/// Which half of the viewer a tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    /// Left half: previous story.
    Left,
    /// Right half: next story.
    Right,
}

impl TapZone {
    /// Classify a horizontal position against the viewer width.
    ///
    /// Positions strictly left of the midpoint are [`TapZone::Left`].
    pub fn from_position(x: u32, width: u32) -> Self {
        if u64::from(x) * 2 < u64::from(width) { Self::Left } else { Self::Right }
    }
}

/// Identifies one scheduled delay so stale firings can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Wrap a raw token value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw token value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Events processed by the story viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryEvent<I> {
    /// Animation frame at `now`.
    Frame {
        /// Current monotonic instant.
        now: I,
    },

    /// Pointer pressed anywhere on the viewer.
    PointerDown {
        /// Press instant.
        now: I,
    },

    /// Pointer released.
    PointerUp {
        /// Release instant.
        now: I,
        /// Half of the viewer the release landed on.
        zone: TapZone,
    },

    /// Pointer left the viewer surface.
    PointerLeave,

    /// Close control activated.
    ClosePressed,

    /// Delete control activated.
    DeletePressed,

    /// Answer to a delete confirmation prompt.
    DeleteConfirmed {
        /// Whether the user confirmed.
        confirmed: bool,
    },

    /// Blob removal finished.
    BlobRemoved {
        /// Outcome of the removal.
        result: Result<(), GatewayError>,
    },

    /// Story row deletion finished.
    RowDeleted {
        /// Outcome of the deletion.
        result: Result<(), GatewayError>,
    },

    /// A scheduled delay elapsed.
    TimerFired {
        /// Token returned with the schedule request.
        token: TimerToken,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_zone_splits_at_midpoint() {
        assert_eq!(TapZone::from_position(0, 80), TapZone::Left);
        assert_eq!(TapZone::from_position(39, 80), TapZone::Left);
        assert_eq!(TapZone::from_position(40, 80), TapZone::Right);
        assert_eq!(TapZone::from_position(79, 80), TapZone::Right);
    }

    #[test]
    fn tap_zone_zero_width_is_right() {
        assert_eq!(TapZone::from_position(0, 0), TapZone::Right);
    }
}
