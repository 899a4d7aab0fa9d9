//! Deterministic simulation harness for Glance.
//!
//! Virtual-clock implementations of the Environment and Driver traits, a
//! fault-injecting gateway, and the tooling for invariant and model-based
//! testing of story playback.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the story
//! viewer. Operations are applied to both the model and the real viewer, and
//! their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties over every rendered state. Use
//! [`InvariantRegistry::standard()`] for the common viewer invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chaotic;
pub mod invariants;
pub mod model;
pub mod sim_driver;
pub mod sim_env;

pub use chaotic::ChaoticGateway;
pub use invariants::{
    ClosedIsFinal, DeletingImpliesPaused, IndicesInBounds, Invariant, InvariantRegistry,
    InvariantResult, PlaybackHistory, ProgressInRange, StoriesNeverReappear, ViewerSnapshot,
    Violation,
};
pub use model::{
    ModelGroup, ModelViewer, ObservableState, Operation, RealViewer, build_groups,
};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::{SimEnv, SimInstant};
