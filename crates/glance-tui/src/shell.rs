//! Screen state for the terminal client.
//!
//! [`Shell`] is a sans-IO state machine over key presses. Anything that
//! needs the backend or the terminal (searching, deleting, playing stories,
//! persisting the theme) comes back as an [`Effect`] for the main loop to
//! carry out.

use glance_app::{
    PostAction, PostCard, ScrollRoot, SearchAction, SearchResults, SearchView, TapTarget,
};
use glance_core::{AUTH_ROUTE, HistoryRouter, Post, PostId, Router, StoryGroup, UserId};

use crate::{InputOutcome, InputState, KeyInput};

/// Which page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Signed out; only quitting is possible.
    SignIn,
    /// Post feed with the story tray.
    Feed,
    /// Search results.
    Search,
}

/// Work the main loop must do on the shell's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Exit the program.
    Quit,
    /// Flip and persist the theme.
    ToggleTheme,
    /// Delete a post and reload the feed.
    DeletePost(PostId),
    /// Run a search and show its results.
    Search(String),
    /// Play stories starting at a group.
    OpenStories {
        /// Group index in the tray.
        group: usize,
    },
}

/// A selectable search result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRow {
    /// Index into the people list.
    Person(usize),
    /// Index into the posts list.
    Post(usize),
}

/// Terminal client state.
#[derive(Debug)]
pub struct Shell {
    screen: Screen,
    user: Option<UserId>,
    router: HistoryRouter,
    scroll: ScrollRoot,
    cards: Vec<PostCard>,
    selected: usize,
    groups: Vec<StoryGroup>,
    tray: usize,
    input: Option<InputState>,
    search: Option<SearchView>,
    result: usize,
    status: Option<String>,
}

impl Shell {
    /// Start on the page the router points at.
    pub fn new(user: Option<UserId>, router: HistoryRouter) -> Self {
        let screen =
            if router.current() == Some(AUTH_ROUTE) { Screen::SignIn } else { Screen::Feed };
        Self {
            screen,
            user,
            router,
            scroll: ScrollRoot::new(),
            cards: Vec::new(),
            selected: 0,
            groups: Vec::new(),
            tray: 0,
            input: None,
            search: None,
            result: 0,
            status: None,
        }
    }

    /// Current page.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Signed-in user.
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Navigation history.
    pub fn router(&self) -> &HistoryRouter {
        &self.router
    }

    /// Scroll root shared by every overlay.
    pub fn scroll(&self) -> &ScrollRoot {
        &self.scroll
    }

    /// Feed cards.
    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    /// Selected feed card index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Story groups in the tray.
    pub fn groups(&self) -> &[StoryGroup] {
        &self.groups
    }

    /// Selected tray entry.
    pub fn tray(&self) -> usize {
        self.tray
    }

    /// Search box, while open.
    pub fn input(&self) -> Option<&InputState> {
        self.input.as_ref()
    }

    /// Search results page, if any.
    pub fn search(&self) -> Option<&SearchView> {
        self.search.as_ref()
    }

    /// Selected search result.
    pub fn result(&self) -> usize {
        self.result
    }

    /// Last status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Replace the status message.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Replace the feed contents.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.cards = posts
            .into_iter()
            .map(|post| PostCard::new(post, self.user.clone(), self.scroll.clone()))
            .collect();
        self.selected = self.selected.min(self.cards.len().saturating_sub(1));
    }

    /// Replace the story tray contents.
    pub fn set_stories(&mut self, groups: Vec<StoryGroup>) {
        self.groups = groups;
        self.tray = self.tray.min(self.groups.len().saturating_sub(1));
    }

    /// Show loaded search results. The detail overlay locks this shell's
    /// scroll root.
    pub fn show_search(&mut self, query: impl Into<String>, results: SearchResults) {
        let mut view = SearchView::new(query, self.scroll.clone());
        view.apply(results);
        let query = view.query().to_owned();
        self.search = Some(view);
        self.result = 0;
        if self.screen != Screen::Search {
            self.router.push(&format!("/search?q={query}"));
        } else {
            self.router.replace(&format!("/search?q={query}"));
        }
        self.screen = Screen::Search;
    }

    /// Search result rows in display order: people first, then posts.
    pub fn result_rows(&self) -> Vec<ResultRow> {
        let Some(view) = &self.search else {
            return Vec::new();
        };
        (0..view.people().len())
            .map(ResultRow::Person)
            .chain((0..view.posts().len()).map(ResultRow::Post))
            .collect()
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<Effect> {
        if self.screen == Screen::SignIn {
            return matches!(key, KeyInput::Char('q') | KeyInput::Esc).then_some(Effect::Quit);
        }

        if let Some(input) = &mut self.input {
            return match input.handle_key(key) {
                InputOutcome::Editing => None,
                InputOutcome::Cancel => {
                    self.input = None;
                    None
                },
                InputOutcome::Submit(query) => {
                    self.input = None;
                    Some(Effect::Search(query))
                },
            };
        }

        match key {
            KeyInput::Char('q') => Some(Effect::Quit),
            KeyInput::Char('t') => Some(Effect::ToggleTheme),
            KeyInput::Char('/') => {
                self.input = Some(InputState::new());
                None
            },
            _ => match self.screen {
                Screen::Feed => self.feed_key(key),
                Screen::Search => {
                    self.search_key(key);
                    None
                },
                Screen::SignIn => None,
            },
        }
    }

    fn feed_key(&mut self, key: KeyInput) -> Option<Effect> {
        match key {
            KeyInput::Up | KeyInput::Char('k') => self.select(self.selected.saturating_sub(1)),
            KeyInput::Down | KeyInput::Char('j') => self.select(self.selected + 1),
            KeyInput::Left => self.tray = self.tray.saturating_sub(1),
            KeyInput::Right => {
                self.tray = (self.tray + 1).min(self.groups.len().saturating_sub(1));
            },
            KeyInput::Char('s') if !self.groups.is_empty() => {
                return Some(Effect::OpenStories { group: self.tray });
            },
            KeyInput::Enter => {
                if let Some(card) = self.cards.get_mut(self.selected) {
                    card.tap(TapTarget::Body);
                }
            },
            KeyInput::Esc => {
                if let Some(card) = self.cards.get_mut(self.selected) {
                    if card.modal().is_some() {
                        card.close_modal();
                    } else {
                        card.pointer_down_outside();
                    }
                }
            },
            KeyInput::Char('m') => {
                if let Some(card) = self.cards.get_mut(self.selected) {
                    card.toggle_menu();
                }
            },
            KeyInput::Char('e') => {
                let action = self.open_menu_card().and_then(PostCard::edit);
                if let Some(PostAction::Edit(post)) = action {
                    let title = post.title.as_deref().unwrap_or("post");
                    self.set_status(format!("Editing \"{title}\""));
                }
            },
            KeyInput::Char('x') => {
                let action = self.open_menu_card().and_then(PostCard::delete);
                if let Some(PostAction::Delete(id)) = action {
                    return Some(Effect::DeletePost(id));
                }
            },
            KeyInput::Char('l') => {
                let action = self.cards.get(self.selected).map(PostCard::like);
                self.report(action);
            },
            KeyInput::Char('c') => {
                let action = self.cards.get(self.selected).map(PostCard::comment);
                self.report(action);
            },
            KeyInput::Char('a') => {
                let action = self.cards.get(self.selected).map(PostCard::open_profile);
                self.report(action);
            },
            _ => {},
        }
        None
    }

    fn search_key(&mut self, key: KeyInput) {
        let rows = self.result_rows();
        let Some(view) = &mut self.search else {
            return;
        };

        match key {
            KeyInput::Up | KeyInput::Char('k') => self.result = self.result.saturating_sub(1),
            KeyInput::Down | KeyInput::Char('j') => {
                self.result = (self.result + 1).min(rows.len().saturating_sub(1));
            },
            KeyInput::Enter => match rows.get(self.result) {
                Some(ResultRow::Person(i)) => {
                    if let Some(SearchAction::Navigate(route)) = view.select_person(*i) {
                        self.navigate(&route);
                    }
                },
                Some(ResultRow::Post(i)) => {
                    if let Some(id) = view.posts().get(*i).map(|p| p.id.clone()) {
                        view.select_post(&id);
                    }
                },
                None => {},
            },
            KeyInput::Char('l') => {
                let action = view.like();
                self.report_search(action);
            },
            KeyInput::Char('c') => {
                let action = view.comment();
                self.report_search(action);
            },
            KeyInput::Esc => {
                if view.detail().is_some() {
                    view.close_detail();
                } else {
                    self.search = None;
                    self.router.back();
                    self.screen = Screen::Feed;
                }
            },
            _ => {},
        }
    }

    fn select(&mut self, index: usize) {
        let index = index.min(self.cards.len().saturating_sub(1));
        if index == self.selected {
            return;
        }
        if let Some(card) = self.cards.get_mut(self.selected) {
            card.pointer_down_outside();
            card.close_modal();
        }
        self.selected = index;
    }

    fn open_menu_card(&mut self) -> Option<&mut PostCard> {
        self.cards.get_mut(self.selected).filter(|card| card.is_menu_open())
    }

    fn navigate(&mut self, route: &str) {
        self.router.push(route);
        self.set_status(format!("Opened {route}"));
    }

    fn report(&mut self, action: Option<PostAction>) {
        match action {
            Some(PostAction::Like(id)) => self.set_status(format!("Liked {id}")),
            Some(PostAction::Comment(id)) => self.set_status(format!("Commenting on {id}")),
            Some(PostAction::OpenProfile(route)) => self.navigate(&route),
            Some(PostAction::Edit(_) | PostAction::Delete(_)) | None => {},
        }
    }

    fn report_search(&mut self, action: Option<SearchAction>) {
        match action {
            Some(SearchAction::Post(action)) => self.report(Some(action)),
            Some(SearchAction::Navigate(route)) => self.navigate(&route),
            None => {},
        }
    }
}
