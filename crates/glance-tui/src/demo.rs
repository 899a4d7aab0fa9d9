//! Demo content for the terminal client.
//!
//! The terminal build has no hosted backend to talk to, so it runs against a
//! [`MemoryGateway`] seeded with a few people, posts, and stories.
//! Timestamps are relative to `now_secs` so the age labels read naturally.

use glance_core::{
    Identity, MemoryGateway, Post, PostAuthor, Profile, Story, StoryAuthor, UserId,
};

const STORAGE_URL: &str = "https://cdn.glance.example/storage/v1/object/public/stories";

/// (id, handle, full name, badge)
const PEOPLE: &[(&str, &str, &str, Option<&str>)] = &[
    ("ana", "ana.k", "Ana Kovac", Some("verified")),
    ("ben", "benji", "Ben Ortiz", None),
    ("cleo", "cleo", "Cleo Marsh", Some("pro")),
    ("dev", "devon_r", "Devon Reyes", Some("admin")),
];

/// (id, author, title, content, minutes ago)
const POSTS: &[(&str, &str, Option<&str>, &str, u64)] = &[
    ("p1", "ana", Some("Morning at the lake"), "Fog lifting off the water at six.", 12),
    ("p2", "ben", None, "Anyone know a good ramen place near the station?", 95),
    ("p3", "cleo", Some("Sketchbook"), "Finished the lake series, eight pages.", 600),
    ("p4", "dev", Some("Maintenance tonight"), "Uploads pause for ten minutes at 23:00.", 2_000),
];

/// (id, author, minutes ago)
const STORIES: &[(&str, &str, u64)] = &[
    ("st1", "ana", 30),
    ("st2", "ben", 45),
    ("st3", "ana", 50),
    ("st4", "cleo", 120),
    ("st5", "ana", 200),
];

/// Build a seeded backend.
///
/// `user` becomes the signed-in identity. `None` leaves the session empty so
/// the session guard redirects.
pub fn seed(user: Option<&str>, now_secs: u64) -> MemoryGateway {
    let gateway = MemoryGateway::new();
    gateway.set_identity(user.map(Identity::new));

    for &(id, username, full_name, badge) in PEOPLE {
        gateway.insert_profile(Profile {
            id: UserId::new(id),
            username: username.to_owned(),
            full_name: Some(full_name.to_owned()),
            avatar_url: None,
            badge: badge.map(str::to_owned),
        });
    }

    for &(id, author, title, content, minutes) in POSTS {
        gateway.insert_post(Post {
            id: id.into(),
            title: title.map(str::to_owned),
            content: content.to_owned(),
            image_url: None,
            author_id: author.into(),
            created_at_secs: now_secs.saturating_sub(minutes * 60),
            author: Some(post_author(author)),
        });
    }

    for &(id, author, minutes) in STORIES {
        gateway.insert_story(Story {
            id: id.into(),
            author_id: author.into(),
            image_url: format!("{STORAGE_URL}/{author}-{id}.jpg"),
            created_at_secs: now_secs.saturating_sub(minutes * 60),
            author: Some(StoryAuthor { username: Some(handle(author).to_owned()), avatar_url: None }),
        });
    }

    tracing::debug!(
        people = PEOPLE.len(),
        posts = POSTS.len(),
        stories = STORIES.len(),
        "demo backend seeded"
    );
    gateway
}

fn post_author(id: &str) -> PostAuthor {
    let person = PEOPLE.iter().find(|p| p.0 == id);
    PostAuthor {
        username: person.map(|p| p.1.to_owned()),
        full_name: person.map(|p| p.2.to_owned()),
        avatar_url: None,
        border_variant: None,
        badge: person.and_then(|p| p.3).map(str::to_owned),
    }
}

fn handle(id: &str) -> &'static str {
    PEOPLE.iter().find(|p| p.0 == id).map_or("user", |p| p.1)
}
