//! Application layer for Glance.
//!
//! Pure state machines for every screen component plus a generic runtime for
//! story playback, so the same code runs in the terminal front end and in
//! deterministic simulation.
//!
//! # Components
//!
//! - [`StoryViewer`]: full-screen story playback, navigation, owner delete
//! - [`PostCard`]: feed card with owner menu and full-content overlay
//! - [`SessionGuard`]: one-shot session check with sign-in redirect
//! - [`ThemeService`]: persisted light/dark flag
//! - [`SearchAggregator`] / [`SearchView`]: concurrent post and people search
//! - [`ScrollRoot`]: background scroll lock held by open overlays
//! - [`Driver`] / [`Runtime`]: platform I/O seam and the story event loop

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod guard;
mod post;
mod runtime;
mod scroll_lock;
mod search;
pub mod story;
mod theme;

pub use driver::Driver;
pub use guard::{GuardState, GuardView, LOADING_TEXT, SessionGuard};
pub use post::{PostAction, PostCard, PostModal, TapTarget};
pub use runtime::Runtime;
pub use scroll_lock::{ScrollGuard, ScrollRoot};
pub use search::{
    NO_RESULTS_TEXT, PEOPLE_LIMIT, SearchAction, SearchAggregator, SearchResults, SearchState,
    SearchView,
};
pub use story::{
    DELETE_ADVANCE_DELAY, DELETE_PROMPT, FRAME_INTERVAL, STORY_DURATION, StoryAction, StoryError,
    StoryEvent, StoryTiming, StoryViewer, TAP_THRESHOLD, TapZone, TimerToken,
};
pub use theme::{THEME_KEY, Theme, ThemeService};
