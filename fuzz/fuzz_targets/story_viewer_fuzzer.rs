//! Fuzz target for the story viewer state machine
//!
//! # Strategy
//!
//! - Collections: 1..=8 groups of 1..=8 stories, any starting group
//! - Identity: signed out, an author in the collection, or a stranger
//! - Operations: arbitrary frames, presses, taps, deletes, and closes
//!
//! # Invariants
//!
//! - The real viewer agrees with the reference model after every operation
//! - Every registered playback invariant holds over the full history

#![no_main]

use arbitrary::Arbitrary;
use glance_app::StoryViewer;
use glance_core::UserId;
use glance_harness::{InvariantRegistry, ModelViewer, Operation, RealViewer, build_groups};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Scenario {
    sizes: Vec<u8>,
    initial: u8,
    user: UserChoice,
    ops: Vec<Operation>,
}

#[derive(Debug, Arbitrary)]
enum UserChoice {
    SignedOut,
    Author(u8),
    Stranger,
}

fuzz_target!(|scenario: Scenario| {
    let sizes: Vec<u8> = scenario.sizes.iter().take(8).map(|size| size % 8 + 1).collect();
    if sizes.is_empty() {
        return;
    }
    let initial = usize::from(scenario.initial) % sizes.len();

    let user = match scenario.user {
        UserChoice::SignedOut => None,
        UserChoice::Author(i) => Some(format!("u{}", usize::from(i) % sizes.len())),
        UserChoice::Stranger => Some("stranger".to_owned()),
    };

    let (model_groups, real_groups) = build_groups(&sizes);
    let viewer = StoryViewer::new(real_groups, initial, user.as_deref().map(UserId::new))
        .expect("non-empty groups always open");

    let mut model = ModelViewer::new(model_groups, initial, user);
    let mut real = RealViewer::new(viewer);
    let registry = InvariantRegistry::standard();

    for (i, op) in scenario.ops.into_iter().take(256).enumerate() {
        model.apply(op);
        real.apply(op);
        assert_eq!(model.observe(), real.observe(), "divergence at operation {i}: {op:?}");
    }

    if let Err(violations) = real.check(&registry) {
        panic!("invariant violations: {violations:?}");
    }
});
