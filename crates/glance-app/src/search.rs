//! Combined post and people search.
//!
//! [`SearchAggregator`] runs both lookups concurrently and degrades a failed
//! lookup to an empty set. [`SearchView`] holds what the results page shows.

use glance_core::{DataGateway, Post, PostId, Profile};

use crate::{PostAction, PostModal, ScrollRoot};

/// Maximum number of people returned by one search.
pub const PEOPLE_LIMIT: usize = 5;

/// Text shown when a search produced nothing.
pub const NO_RESULTS_TEXT: &str = "No results found.";

/// Output of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Matching posts, newest first.
    pub posts: Vec<Post>,
    /// Matching people, at most [`PEOPLE_LIMIT`].
    pub people: Vec<Profile>,
}

impl SearchResults {
    /// Neither lookup found anything.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.people.is_empty()
    }
}

/// Runs post and people lookups against a gateway.
#[derive(Debug, Clone)]
pub struct SearchAggregator<G> {
    gateway: G,
}

impl<G: DataGateway> SearchAggregator<G> {
    /// Search through `gateway`.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Run both lookups for `query` and wait for both.
    ///
    /// A blank query returns empty results without touching the gateway.
    pub async fn search(&self, query: &str) -> SearchResults {
        let query = query.trim();
        if query.is_empty() {
            return SearchResults::default();
        }

        let (posts, people) = tokio::join!(
            self.gateway.search_posts(query),
            self.gateway.search_profiles(query, PEOPLE_LIMIT),
        );

        let posts = posts.unwrap_or_else(|error| {
            tracing::error!(%error, query, "post search failed");
            Vec::new()
        });
        let mut people = people.unwrap_or_else(|error| {
            tracing::error!(%error, query, "people search failed");
            Vec::new()
        });
        people.truncate(PEOPLE_LIMIT);

        tracing::debug!(query, posts = posts.len(), people = people.len(), "search complete");
        SearchResults { posts, people }
    }

    /// Gateway searched through.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

/// Results page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Lookups in flight.
    Loading,
    /// Nothing matched.
    Empty,
    /// At least one match.
    Results(SearchResults),
}

/// Intents emitted by the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Go to a route.
    Navigate(String),
    /// Delegated post engagement.
    Post(PostAction),
}

/// Results page for one query.
#[derive(Debug)]
pub struct SearchView {
    query: String,
    state: SearchState,
    scroll: ScrollRoot,
    detail: Option<PostModal>,
}

impl SearchView {
    /// Page for `query`, initially loading.
    pub fn new(query: impl Into<String>, scroll: ScrollRoot) -> Self {
        Self { query: query.into(), state: SearchState::Loading, scroll, detail: None }
    }

    /// Run the search and store its results.
    pub async fn load<G: DataGateway>(&mut self, aggregator: &SearchAggregator<G>) {
        self.state = SearchState::Loading;
        let results = aggregator.search(&self.query).await;
        self.apply(results);
    }

    /// Store finished results.
    pub fn apply(&mut self, results: SearchResults) {
        self.state =
            if results.is_empty() { SearchState::Empty } else { SearchState::Results(results) };
    }

    /// Query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Page heading.
    pub fn title(&self) -> String {
        format!("Results for: \"{}\"", self.query)
    }

    /// Current state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Matching people, if loaded.
    pub fn people(&self) -> &[Profile] {
        match &self.state {
            SearchState::Results(results) => &results.people,
            _ => &[],
        }
    }

    /// Matching posts, if loaded.
    pub fn posts(&self) -> &[Post] {
        match &self.state {
            SearchState::Results(results) => &results.posts,
            _ => &[],
        }
    }

    /// "People" section heading is shown.
    pub fn show_people_heading(&self) -> bool {
        !self.people().is_empty()
    }

    /// "Posts" section heading is shown, only alongside people.
    pub fn show_posts_heading(&self) -> bool {
        !self.people().is_empty() && !self.posts().is_empty()
    }

    /// Person card selected: navigate to their profile.
    pub fn select_person(&self, index: usize) -> Option<SearchAction> {
        self.people().get(index).map(|p| SearchAction::Navigate(p.route()))
    }

    /// Post card selected: open the read-only detail overlay.
    pub fn select_post(&mut self, id: &PostId) -> bool {
        let Some(post) = self.posts().iter().find(|p| &p.id == id).cloned() else {
            return false;
        };
        self.detail = Some(PostModal::open(post, &self.scroll));
        true
    }

    /// Open detail overlay.
    pub fn detail(&self) -> Option<&PostModal> {
        self.detail.as_ref()
    }

    /// Dismiss the detail overlay.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Like the post in the detail overlay.
    pub fn like(&self) -> Option<SearchAction> {
        self.detail.as_ref().map(|d| SearchAction::Post(d.like()))
    }

    /// Comment on the post in the detail overlay.
    pub fn comment(&self) -> Option<SearchAction> {
        self.detail.as_ref().map(|d| SearchAction::Post(d.comment()))
    }
}

#[cfg(test)]
mod tests {
    use glance_core::{GatewayError, MemoryGateway, Story, Table, UserId};

    use super::*;

    fn post(id: &str, content: &str, created: u64) -> Post {
        Post {
            id: PostId::new(id),
            title: None,
            content: content.into(),
            image_url: None,
            author_id: UserId::new("alice"),
            created_at_secs: created,
            author: None,
        }
    }

    fn profile(id: &str, username: &str) -> Profile {
        Profile {
            id: UserId::new(id),
            username: username.into(),
            full_name: None,
            avatar_url: None,
            badge: None,
        }
    }

    /// Gateway whose people lookup always fails.
    struct PeopleDown(MemoryGateway);

    impl DataGateway for PeopleDown {
        async fn search_posts(&self, pattern: &str) -> Result<Vec<Post>, GatewayError> {
            self.0.search_posts(pattern).await
        }

        async fn search_profiles(
            &self,
            _pattern: &str,
            _limit: usize,
        ) -> Result<Vec<Profile>, GatewayError> {
            Err(GatewayError::Transport("people index offline".into()))
        }

        async fn list_stories(&self) -> Result<Vec<Story>, GatewayError> {
            self.0.list_stories().await
        }

        async fn list_posts(&self) -> Result<Vec<Post>, GatewayError> {
            self.0.list_posts().await
        }

        async fn delete_row(&self, table: Table, id: &str) -> Result<(), GatewayError> {
            self.0.delete_row(table, id).await
        }
    }

    fn seeded() -> MemoryGateway {
        let gateway = MemoryGateway::new();
        gateway.insert_post(post("p1", "rust is fun", 10));
        gateway.insert_post(post("p2", "more Rust", 20));
        gateway.insert_post(post("p3", "gardening", 30));
        for i in 0..8 {
            gateway.insert_profile(profile(&format!("u{i}"), &format!("rustacean{i}")));
        }
        gateway
    }

    #[tokio::test]
    async fn blank_query_skips_lookups() {
        let aggregator = SearchAggregator::new(seeded());

        assert!(aggregator.search("   ").await.is_empty());
        assert_eq!(aggregator.gateway().request_count(), 0);
    }

    #[tokio::test]
    async fn combines_posts_and_capped_people() {
        let aggregator = SearchAggregator::new(seeded());
        let results = aggregator.search("rust").await;

        let ids: Vec<&str> = results.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
        assert_eq!(results.people.len(), PEOPLE_LIMIT);
        assert_eq!(aggregator.gateway().request_count(), 2);
    }

    #[tokio::test]
    async fn failed_lookup_degrades_to_empty() {
        let aggregator = SearchAggregator::new(PeopleDown(seeded()));
        let results = aggregator.search("rust").await;

        assert_eq!(results.posts.len(), 2);
        assert!(results.people.is_empty());
    }

    #[tokio::test]
    async fn view_moves_from_loading_to_empty() {
        let aggregator = SearchAggregator::new(seeded());
        let mut view = SearchView::new("nothing matches this", ScrollRoot::new());
        assert_eq!(view.state(), &SearchState::Loading);

        view.load(&aggregator).await;

        assert_eq!(view.state(), &SearchState::Empty);
        assert!(!view.show_people_heading());
        assert!(!view.show_posts_heading());
    }

    #[test]
    fn posts_heading_requires_people() {
        let mut view = SearchView::new("rust", ScrollRoot::new());
        view.apply(SearchResults { posts: vec![post("p1", "rust", 1)], people: vec![] });
        assert!(!view.show_people_heading());
        assert!(!view.show_posts_heading());

        view.apply(SearchResults {
            posts: vec![post("p1", "rust", 1)],
            people: vec![profile("u1", "rustacean")],
        });
        assert!(view.show_people_heading());
        assert!(view.show_posts_heading());
    }

    #[test]
    fn selecting_person_navigates_to_profile() {
        let mut view = SearchView::new("rust", ScrollRoot::new());
        view.apply(SearchResults { posts: vec![], people: vec![profile("u7", "rustacean")] });

        assert_eq!(view.select_person(0), Some(SearchAction::Navigate("/user/u7".into())));
        assert_eq!(view.select_person(1), None);
    }

    #[test]
    fn detail_overlay_locks_scroll_and_delegates() {
        let root = ScrollRoot::new();
        let mut view = SearchView::new("rust", root.clone());
        view.apply(SearchResults { posts: vec![post("p1", "rust", 1)], people: vec![] });

        assert!(!view.select_post(&PostId::new("missing")));
        assert!(view.select_post(&PostId::new("p1")));
        assert!(root.is_locked());
        assert_eq!(view.like(), Some(SearchAction::Post(PostAction::Like(PostId::new("p1")))));

        view.close_detail();
        assert!(!root.is_locked());
        assert_eq!(view.comment(), None);
    }

    #[test]
    fn title_quotes_query() {
        let view = SearchView::new("cats", ScrollRoot::new());
        assert_eq!(view.title(), "Results for: \"cats\"");
    }
}
