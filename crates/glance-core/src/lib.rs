//! Core types and collaborator contracts for the Glance client.
//!
//! Everything the view state machines need to know about the outside world
//! lives here: the records they display, the clock they are driven by, and
//! the traits through which they reach the hosted backend, the router, and
//! local preference storage.
//!
//! # Components
//!
//! - [`model`]: stories, posts, profiles, identities, display rules
//! - [`env`]: monotonic clock abstraction for deterministic playback
//! - [`gateway`]: backend contracts plus an in-memory backend
//! - [`prefs`]: durable key/value preferences

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
pub mod error;
pub mod gateway;
pub mod model;
pub mod prefs;

pub use env::{Environment, SystemEnv};
pub use error::{GatewayError, PreferenceError};
pub use gateway::{
    AUTH_ROUTE, BlobStore, DataGateway, HistoryRouter, MemoryGateway, Router, STORIES_BUCKET,
    SessionProvider, Table,
};
pub use model::{
    Badge, DEFAULT_AVATAR, FALLBACK_NAME, Identity, Post, PostAuthor, PostId, Profile, Story,
    StoryAuthor, StoryGroup, StoryId, UserId, group_stories, profile_route, relative_time,
};
pub use prefs::{MemoryPreferences, PreferenceStore};
