//! Fuzz target for story grouping
//!
//! # Invariants
//!
//! - No story is lost or duplicated
//! - Each group holds exactly one author's stories, none empty
//! - Groups appear in first-seen author order
//! - Stories keep their input order within a group

#![no_main]

use arbitrary::Arbitrary;
use glance_core::{Story, StoryId, UserId, group_stories};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    /// Author index per story.
    authors: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let stories: Vec<Story> = input
        .authors
        .iter()
        .enumerate()
        .map(|(i, author)| Story {
            id: StoryId::new(format!("s{i}")),
            author_id: UserId::new(format!("u{}", author % 16)),
            image_url: String::new(),
            created_at_secs: 0,
            author: None,
        })
        .collect();

    let groups = group_stories(stories.clone());

    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, stories.len());

    let mut first_seen: Vec<&UserId> = Vec::new();
    for story in &stories {
        if !first_seen.contains(&&story.author_id) {
            first_seen.push(&story.author_id);
        }
    }
    let order: Vec<&UserId> = groups.iter().map(|g| g.author_id()).collect();
    assert_eq!(order, first_seen);

    for group in &groups {
        assert!(!group.is_empty());
        let expected: Vec<&Story> =
            stories.iter().filter(|s| &s.author_id == group.author_id()).collect();
        let actual: Vec<&Story> = group.stories().iter().collect();
        assert_eq!(actual, expected);
    }
});
