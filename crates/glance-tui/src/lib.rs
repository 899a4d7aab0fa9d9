//! Terminal front end for Glance.
//!
//! A thin shell over the [`glance_app`] state machines that provides
//! terminal-specific I/O: crossterm input, ratatui rendering, and a redb
//! file for preferences. Story playback runs through the generic
//! [`glance_app::Runtime`] with a terminal [`Driver`](glance_app::Driver).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod demo;
pub mod input;
pub mod prefs;
pub mod shell;
pub mod terminal;
pub mod ui;

pub use input::{InputOutcome, InputState, KeyInput};
pub use prefs::RedbPreferences;
pub use shell::{Effect, ResultRow, Screen, Shell};
pub use terminal::{StoryDriver, TerminalError, Tui};
