#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{BlobStore, DataGateway, SessionProvider, Table};
use crate::{GatewayError, Identity, Post, Profile, Story};

/// In-memory backend for tests, simulation, and the offline terminal demo.
///
/// Implements every gateway trait over one shared state. All state is wrapped
/// in `Arc<Mutex<>>` so clones observe the same rows; a poisoned lock is
/// recovered rather than propagated since the data stays consistent between
/// calls.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<MemoryGatewayInner>>,
}

#[derive(Default)]
struct MemoryGatewayInner {
    /// Post rows in insertion order.
    posts: Vec<Post>,

    /// Profile rows in insertion order.
    profiles: Vec<Profile>,

    /// Story rows in insertion order.
    stories: Vec<Story>,

    /// Stored object names per bucket.
    blobs: HashMap<String, HashSet<String>>,

    /// Signed-in identity, `None` for a guest session.
    identity: Option<Identity>,

    /// Number of gateway requests served (all traits).
    request_count: usize,
}

impl MemoryGateway {
    /// Create an empty backend with a guest session.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryGatewayInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_request(&self) -> MutexGuard<'_, MemoryGatewayInner> {
        let mut inner = self.lock();
        inner.request_count += 1;
        inner
    }

    /// Sign in as `identity`, or sign out with `None`.
    pub fn set_identity(&self, identity: Option<Identity>) {
        self.lock().identity = identity;
    }

    /// Insert a post row.
    pub fn insert_post(&self, post: Post) {
        self.lock().posts.push(post);
    }

    /// Insert a profile row.
    pub fn insert_profile(&self, profile: Profile) {
        self.lock().profiles.push(profile);
    }

    /// Insert a story row and store its image object.
    pub fn insert_story(&self, story: Story) {
        let mut inner = self.lock();
        if let Some(name) = story.blob_file_name() {
            inner.blobs.entry(super::STORIES_BUCKET.to_owned()).or_default().insert(name.to_owned());
        }
        inner.stories.push(story);
    }

    /// Whether a stored object exists.
    pub fn has_blob(&self, bucket: &str, name: &str) -> bool {
        self.lock().blobs.get(bucket).is_some_and(|names| names.contains(name))
    }

    /// Whether a story row exists.
    pub fn has_story(&self, id: &str) -> bool {
        self.lock().stories.iter().any(|s| s.id.as_str() == id)
    }

    /// Number of story rows.
    pub fn story_count(&self) -> usize {
        self.lock().stories.len()
    }

    /// Number of post rows.
    pub fn post_count(&self) -> usize {
        self.lock().posts.len()
    }

    /// Total number of requests served.
    ///
    /// Lets tests assert that a code path issued no remote call at all.
    pub fn request_count(&self) -> usize {
        self.lock().request_count
    }
}

/// Newest-first copy of rows keyed by their creation timestamp.
///
/// Stable, so rows created in the same second keep reverse insertion order.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> u64) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    out
}

impl DataGateway for MemoryGateway {
    async fn search_posts(&self, pattern: &str) -> Result<Vec<Post>, GatewayError> {
        let inner = self.record_request();
        let matching: Vec<Post> = inner.posts.iter().filter(|p| p.matches(pattern)).cloned().collect();
        Ok(newest_first(&matching, |p| p.created_at_secs))
    }

    async fn search_profiles(
        &self,
        pattern: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, GatewayError> {
        let inner = self.record_request();
        Ok(inner.profiles.iter().filter(|p| p.matches(pattern)).take(limit).cloned().collect())
    }

    async fn list_stories(&self) -> Result<Vec<Story>, GatewayError> {
        let inner = self.record_request();
        Ok(newest_first(&inner.stories, |s| s.created_at_secs))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, GatewayError> {
        let inner = self.record_request();
        Ok(newest_first(&inner.posts, |p| p.created_at_secs))
    }

    async fn delete_row(&self, table: Table, id: &str) -> Result<(), GatewayError> {
        let mut inner = self.record_request();
        let removed = match table {
            Table::Stories => {
                let before = inner.stories.len();
                inner.stories.retain(|s| s.id.as_str() != id);
                before != inner.stories.len()
            },
            Table::Posts => {
                let before = inner.posts.len();
                inner.posts.retain(|p| p.id.as_str() != id);
                before != inner.posts.len()
            },
        };

        if removed {
            Ok(())
        } else {
            let kind = match table {
                Table::Stories => "story",
                Table::Posts => "post",
            };
            Err(GatewayError::NotFound { kind, id: id.to_owned() })
        }
    }
}

impl BlobStore for MemoryGateway {
    async fn remove(&self, bucket: &str, names: &[String]) -> Result<(), GatewayError> {
        let mut inner = self.record_request();
        if let Some(stored) = inner.blobs.get_mut(bucket) {
            for name in names {
                stored.remove(name);
            }
        }
        Ok(())
    }
}

impl SessionProvider for MemoryGateway {
    async fn current_identity(&self) -> Result<Option<Identity>, GatewayError> {
        let inner = self.record_request();
        Ok(inner.identity.clone())
    }
}
