//! Contracts for the hosted backend.
//!
//! The backend-as-a-service is consumed, never implemented, by the client.
//! These traits capture exactly the calls the views make: pattern search over
//! posts and profiles, listing stories, deleting a row by primary key,
//! removing stored objects, resolving the current session, and client-side
//! navigation.
//!
//! Every remote call is async and independent; there is no transaction
//! spanning two calls. Callers decide which failures are fatal.

mod memory;
mod router;

use std::future::Future;

pub use memory::MemoryGateway;
pub use router::HistoryRouter;

use crate::{GatewayError, Identity, Post, Profile, Story};

/// Bucket holding story images.
pub const STORIES_BUCKET: &str = "stories";

/// Route of the authentication entry point.
pub const AUTH_ROUTE: &str = "/auth";

/// Tables that support deletion by primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Story rows.
    Stories,
    /// Post rows.
    Posts,
}

impl Table {
    /// Backend table name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Stories => "stories",
            Self::Posts => "posts",
        }
    }
}

/// Relational side of the backend.
pub trait DataGateway: Send + Sync {
    /// Posts whose title or content contains `pattern` (case-insensitive),
    /// newest first, joined with author profiles.
    fn search_posts(
        &self,
        pattern: &str,
    ) -> impl Future<Output = Result<Vec<Post>, GatewayError>> + Send;

    /// Up to `limit` profiles whose handle or full name contains `pattern`
    /// (case-insensitive).
    fn search_profiles(
        &self,
        pattern: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Profile>, GatewayError>> + Send;

    /// Active stories, newest first, joined with author profiles.
    fn list_stories(&self) -> impl Future<Output = Result<Vec<Story>, GatewayError>> + Send;

    /// Feed posts, newest first, joined with author profiles.
    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>, GatewayError>> + Send;

    /// Delete one row by primary key.
    ///
    /// Deleting a row that does not exist is an error
    /// ([`GatewayError::NotFound`]).
    fn delete_row(
        &self,
        table: Table,
        id: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// Object storage side of the backend.
pub trait BlobStore: Send + Sync {
    /// Remove objects by name from a bucket.
    ///
    /// Names that do not exist are ignored; an error means the request
    /// itself failed.
    fn remove(
        &self,
        bucket: &str,
        names: &[String],
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// Authentication side of the backend.
pub trait SessionProvider: Send + Sync {
    /// Identity of the signed-in user. `None` for guests.
    fn current_identity(
        &self,
    ) -> impl Future<Output = Result<Option<Identity>, GatewayError>> + Send;
}

/// Client-side navigation.
pub trait Router {
    /// Navigate to `path`, adding a history entry.
    fn push(&mut self, path: &str);

    /// Navigate to `path`, replacing the current history entry.
    fn replace(&mut self, path: &str);
}
