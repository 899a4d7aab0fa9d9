//! Domain records exchanged with the gateway.
//!
//! Rows arrive from the backend already joined with their author profile, so
//! [`Story`] and [`Post`] embed an author summary rather than a foreign key
//! lookup. All records are plain data: ownership checks, grouping, and
//! display fallbacks live here so every view applies the same rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback avatar for authors without one.
pub const DEFAULT_AVATAR: &str = "/default-avatar.png";

/// Fallback display name when a profile has no usable name.
pub const FALLBACK_NAME: &str = "User";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Identifier of an authenticated user and of the profile row they own.
    UserId
);
string_id!(
    /// Identifier of a post row.
    PostId
);
string_id!(
    /// Identifier of a story row.
    StoryId
);

/// Minimal session identity, used only for ownership comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Authenticated user ID.
    pub id: UserId,
}

impl Identity {
    /// Create an identity for the given user.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into() }
    }

    /// Whether this identity authored a resource.
    pub fn owns(&self, author_id: &UserId) -> bool {
        &self.id == author_id
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Profile badge shown next to a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    /// Verified account.
    Verified,
    /// Site administrator.
    Admin,
    /// Paying member.
    Pro,
}

impl Badge {
    /// Parse a stored badge tag. Unknown tags carry no badge.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "verified" => Some(Self::Verified),
            "admin" => Some(Self::Admin),
            "pro" => Some(Self::Pro),
            _ => None,
        }
    }

    /// Hover title for the badge.
    pub fn title(self) -> &'static str {
        match self {
            Self::Verified => "Verified User",
            Self::Admin => "Admin",
            Self::Pro => "Pro Member",
        }
    }
}

/// Author summary joined onto a story row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryAuthor {
    /// Handle, if the profile has one.
    pub username: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

/// A single ephemeral image with a fixed display duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Row ID.
    pub id: StoryId,
    /// Owner of the story.
    pub author_id: UserId,
    /// Public URL of the stored image.
    pub image_url: String,
    /// Unix timestamp (seconds) of creation.
    pub created_at_secs: u64,
    /// Joined author profile. `None` if the join produced nothing.
    #[serde(default)]
    pub author: Option<StoryAuthor>,
}

impl Story {
    /// Name shown in the viewer header.
    pub fn author_name(&self) -> &str {
        self.author.as_ref().and_then(|a| a.username.as_deref()).unwrap_or(FALLBACK_NAME)
    }

    /// Avatar shown in the viewer header.
    pub fn author_avatar(&self) -> &str {
        self.author.as_ref().and_then(|a| a.avatar_url.as_deref()).unwrap_or(DEFAULT_AVATAR)
    }

    /// Object name of the image inside the stories bucket.
    ///
    /// The bucket key is the last path segment of the public URL. `None` if
    /// the URL ends in a slash or is empty.
    pub fn blob_file_name(&self) -> Option<&str> {
        self.image_url.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// One author's active stories, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGroup {
    author_id: UserId,
    stories: Vec<Story>,
}

impl StoryGroup {
    /// Build a group from stories that all belong to `author_id`.
    pub fn new(author_id: UserId, stories: Vec<Story>) -> Self {
        Self { author_id, stories }
    }

    /// Author owning every story in the group.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Stories in display order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Number of stories.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether the group holds no stories.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Story at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    /// Remove a story by ID, returning it if it was present.
    pub fn remove(&mut self, id: &StoryId) -> Option<Story> {
        let position = self.stories.iter().position(|s| &s.id == id)?;
        Some(self.stories.remove(position))
    }
}

/// Group a flat story list by author.
///
/// Authors appear in the order of their first story; stories keep their
/// relative order. The upstream query decides recency, this only partitions.
pub fn group_stories(stories: impl IntoIterator<Item = Story>) -> Vec<StoryGroup> {
    let mut groups: Vec<StoryGroup> = Vec::new();
    for story in stories {
        match groups.iter_mut().find(|g| g.author_id == story.author_id) {
            Some(group) => group.stories.push(story),
            None => groups.push(StoryGroup::new(story.author_id.clone(), vec![story])),
        }
    }
    groups
}

/// Author summary joined onto a post row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    /// Handle.
    pub username: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Animated avatar border tag.
    #[serde(default)]
    pub border_variant: Option<String>,
    /// Raw badge tag.
    #[serde(default)]
    pub badge: Option<String>,
}

/// A feed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Row ID.
    pub id: PostId,
    /// Optional headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Body text.
    pub content: String,
    /// Optional attached image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Owner of the post.
    pub author_id: UserId,
    /// Unix timestamp (seconds) of creation.
    pub created_at_secs: u64,
    /// Joined author profile.
    #[serde(default)]
    pub author: Option<PostAuthor>,
}

impl Post {
    /// Author name: full name, then handle, then a generic fallback.
    pub fn display_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| non_empty(a.full_name.as_deref()).or(non_empty(a.username.as_deref())))
            .unwrap_or(FALLBACK_NAME)
    }

    /// Upper-cased first character of [`Post::display_name`].
    pub fn display_initial(&self) -> char {
        self.display_name().chars().next().and_then(|c| c.to_uppercase().next()).unwrap_or('U')
    }

    /// Avatar border tag, `"none"` if unset.
    pub fn border_variant(&self) -> &str {
        self.author.as_ref().and_then(|a| a.border_variant.as_deref()).unwrap_or("none")
    }

    /// Author badge, if the tag is one we render.
    pub fn badge(&self) -> Option<Badge> {
        self.author.as_ref().and_then(|a| a.badge.as_deref()).and_then(Badge::parse)
    }

    /// Case-insensitive substring match over title and content.
    pub fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.content, needle)
            || self.title.as_deref().is_some_and(|t| contains_ignore_case(t, needle))
    }
}

/// A person, as returned by profile search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user.
    pub id: UserId,
    /// Handle.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Raw badge tag.
    #[serde(default)]
    pub badge: Option<String>,
}

impl Profile {
    /// Name shown on the result card.
    pub fn display_name(&self) -> &str {
        non_empty(self.full_name.as_deref()).unwrap_or(FALLBACK_NAME)
    }

    /// `@handle` line under the name.
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    /// Profile route for this person.
    pub fn route(&self) -> String {
        profile_route(&self.id)
    }

    /// Case-insensitive substring match over handle and display name.
    pub fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.username, needle)
            || self.full_name.as_deref().is_some_and(|n| contains_ignore_case(n, needle))
    }
}

/// Route of a user's profile page.
pub fn profile_route(id: &UserId) -> String {
    format!("/user/{id}")
}

/// Human-readable age of a record ("5 minutes ago").
///
/// Timestamps in the future read as "just now".
pub fn relative_time(now_secs: u64, created_secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let age = now_secs.saturating_sub(created_secs);
    let (count, unit) = match age {
        a if a < MINUTE => return "just now".to_owned(),
        a if a < HOUR => (a / MINUTE, "minute"),
        a if a < DAY => (a / HOUR, "hour"),
        a => (a / DAY, "day"),
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
