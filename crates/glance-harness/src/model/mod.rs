//! Reference model for model-based testing.
//!
//! [`ModelViewer`] restates playback rules without timers or effects.
//! Random [`Operation`] sequences are applied to the model and, through
//! [`RealViewer`], to a real [`glance_app::StoryViewer`]; their
//! [`ObservableState`]s must agree after every step.

mod operation;
mod real;
mod viewer;

pub use operation::{ObservableState, Operation};
pub use real::{RealViewer, build_groups};
pub use viewer::{ModelGroup, ModelViewer};
