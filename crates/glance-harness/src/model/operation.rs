//! Operations for model-based testing.
//!
//! Operations represent everything a user or the clock can do to an open
//! story viewer. They are generated by proptest or the fuzzer and applied to
//! both the model and the real viewer.

use arbitrary::Arbitrary;

/// Operations that can be applied to a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Animation frame after `millis` of clock time.
    Frame {
        /// Milliseconds since the previous operation.
        millis: u16,
    },

    /// Pointer pressed.
    Press,

    /// Pointer released after `held_millis`.
    Release {
        /// Release on the right half.
        right: bool,
        /// Milliseconds between press and release.
        held_millis: u16,
    },

    /// Pointer left the viewer.
    Leave,

    /// Direct next.
    Next,

    /// Direct previous.
    Prev,

    /// Close control.
    Close,

    /// Full delete flow on the current story.
    Delete {
        /// User confirms the prompt.
        confirm: bool,
        /// Blob removal fails.
        blob_fails: bool,
        /// Row deletion fails.
        row_fails: bool,
    },
}

/// Observable state compared between model and real viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableState {
    /// Current position. `None` once closed.
    pub position: Option<(usize, usize)>,
    /// Current story ID. `None` once closed.
    pub story_id: Option<String>,
    /// Progress of the current story. `None` once closed.
    pub progress: Option<f64>,
    /// Playback frozen.
    pub paused: bool,
    /// Stories left in the collection.
    pub remaining: usize,
}
