//! Post card presentation state.
//!
//! A [`PostCard`] tracks what one feed card shows and which overlays are
//! open. Mutations are never performed here; owner actions are emitted as
//! [`PostAction`]s for the surrounding feed to carry out.

use glance_core::{Badge, Post, PostId, UserId, profile_route};

use crate::{ScrollGuard, ScrollRoot};

/// What a tap on the card landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// Plain card surface.
    Body,
    /// A button inside the card.
    Button,
    /// A link inside the card.
    Link,
    /// The like/comment action row.
    ActionZone,
}

impl TapTarget {
    /// Nested control that handles its own taps.
    pub fn is_interactive(self) -> bool {
        !matches!(self, Self::Body)
    }
}

/// Intents emitted by post cards and overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAction {
    /// Open the editor for this post.
    Edit(Post),
    /// Delete this post.
    Delete(PostId),
    /// Toggle like.
    Like(PostId),
    /// Open comments.
    Comment(PostId),
    /// Navigate to the author's profile.
    OpenProfile(String),
}

/// Read-only full-content overlay for a post.
///
/// Holds background scroll locked for as long as it exists.
#[derive(Debug)]
pub struct PostModal {
    post: Post,
    _scroll: ScrollGuard,
}

impl PostModal {
    /// Open an overlay for `post`, locking `scroll`.
    pub fn open(post: Post, scroll: &ScrollRoot) -> Self {
        Self { post, _scroll: scroll.lock() }
    }

    /// Post shown in the overlay.
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Like the shown post.
    pub fn like(&self) -> PostAction {
        PostAction::Like(self.post.id.clone())
    }

    /// Comment on the shown post.
    pub fn comment(&self) -> PostAction {
        PostAction::Comment(self.post.id.clone())
    }
}

/// One condensed post in a feed.
#[derive(Debug)]
pub struct PostCard {
    post: Post,
    viewer: Option<UserId>,
    scroll: ScrollRoot,
    menu_open: bool,
    modal: Option<PostModal>,
}

impl PostCard {
    /// Card for `post` as seen by `viewer`.
    pub fn new(post: Post, viewer: Option<UserId>, scroll: ScrollRoot) -> Self {
        Self { post, viewer, scroll, menu_open: false, modal: None }
    }

    /// Underlying post.
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Viewer wrote this post.
    pub fn is_owner(&self) -> bool {
        self.viewer.as_ref().is_some_and(|v| v == &self.post.author_id)
    }

    /// Owner-only edit/delete menu trigger is shown.
    pub fn owner_menu_visible(&self) -> bool {
        self.is_owner()
    }

    /// "Author" tag next to the name.
    pub fn author_tag_visible(&self) -> bool {
        self.is_owner()
    }

    /// Author display name.
    pub fn display_name(&self) -> &str {
        self.post.display_name()
    }

    /// Avatar fallback letter.
    pub fn display_initial(&self) -> char {
        self.post.display_initial()
    }

    /// Author badge.
    pub fn badge(&self) -> Option<Badge> {
        self.post.badge()
    }

    /// Owner menu is expanded.
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// An outside-pointer listener is needed.
    pub fn listens_outside(&self) -> bool {
        self.menu_open
    }

    /// Expand or collapse the owner menu. No-op for non-owners.
    pub fn toggle_menu(&mut self) {
        if self.is_owner() {
            self.menu_open = !self.menu_open;
        }
    }

    /// Pointer pressed outside the menu.
    pub fn pointer_down_outside(&mut self) {
        self.menu_open = false;
    }

    /// Tap on the card. Opens the full-content overlay unless a nested
    /// control was hit. Returns whether the overlay opened.
    pub fn tap(&mut self, target: TapTarget) -> bool {
        if target.is_interactive() || self.modal.is_some() {
            return false;
        }
        self.modal = Some(PostModal::open(self.post.clone(), &self.scroll));
        true
    }

    /// Full-content overlay, if open.
    pub fn modal(&self) -> Option<&PostModal> {
        self.modal.as_ref()
    }

    /// Dismiss the overlay.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Edit intent. `None` unless the viewer owns the post.
    pub fn edit(&mut self) -> Option<PostAction> {
        self.owner_action(|post| PostAction::Edit(post.clone()))
    }

    /// Delete intent. `None` unless the viewer owns the post.
    pub fn delete(&mut self) -> Option<PostAction> {
        self.owner_action(|post| PostAction::Delete(post.id.clone()))
    }

    /// Like intent.
    pub fn like(&self) -> PostAction {
        PostAction::Like(self.post.id.clone())
    }

    /// Comment intent.
    pub fn comment(&self) -> PostAction {
        PostAction::Comment(self.post.id.clone())
    }

    /// Navigate to the author's profile.
    pub fn open_profile(&self) -> PostAction {
        PostAction::OpenProfile(profile_route(&self.post.author_id))
    }

    fn owner_action(&mut self, make: impl FnOnce(&Post) -> PostAction) -> Option<PostAction> {
        if !self.is_owner() {
            tracing::warn!(post_id = %self.post.id, "owner action refused");
            return None;
        }
        self.menu_open = false;
        Some(make(&self.post))
    }
}

#[cfg(test)]
mod tests {
    use glance_core::PostAuthor;

    use super::*;

    fn post() -> Post {
        Post {
            id: PostId::new("p1"),
            title: Some("Hello".into()),
            content: "First post".into(),
            image_url: None,
            author_id: UserId::new("alice"),
            created_at_secs: 0,
            author: Some(PostAuthor {
                username: Some("alice".into()),
                full_name: Some("Alice Liddell".into()),
                avatar_url: None,
                border_variant: None,
                badge: Some("verified".into()),
            }),
        }
    }

    fn card(viewer: Option<&str>) -> (PostCard, ScrollRoot) {
        let root = ScrollRoot::new();
        (PostCard::new(post(), viewer.map(UserId::new), root.clone()), root)
    }

    #[test]
    fn owner_sees_menu_and_tag() {
        let (card, _) = card(Some("alice"));
        assert!(card.owner_menu_visible());
        assert!(card.author_tag_visible());
        assert_eq!(card.badge(), Some(Badge::Verified));
        assert_eq!(card.display_initial(), 'A');
    }

    #[test]
    fn others_see_no_owner_controls() {
        let (mut card, _) = card(Some("bob"));
        assert!(!card.owner_menu_visible());

        card.toggle_menu();
        assert!(!card.is_menu_open());
        assert_eq!(card.edit(), None);
        assert_eq!(card.delete(), None);
    }

    #[test]
    fn signed_out_is_not_owner() {
        let (card, _) = card(None);
        assert!(!card.is_owner());
    }

    #[test]
    fn owner_actions_emit_intents_and_close_menu() {
        let (mut card, _) = card(Some("alice"));
        card.toggle_menu();
        assert!(card.listens_outside());

        assert_eq!(card.edit(), Some(PostAction::Edit(post())));
        assert!(!card.is_menu_open());

        card.toggle_menu();
        assert_eq!(card.delete(), Some(PostAction::Delete(PostId::new("p1"))));
    }

    #[test]
    fn outside_pointer_closes_menu() {
        let (mut card, _) = card(Some("alice"));
        card.toggle_menu();
        card.pointer_down_outside();

        assert!(!card.is_menu_open());
        assert!(!card.listens_outside());
    }

    #[test]
    fn tap_on_controls_does_not_open_modal() {
        let (mut card, root) = card(None);
        for target in [TapTarget::Button, TapTarget::Link, TapTarget::ActionZone] {
            assert!(!card.tap(target));
        }
        assert!(card.modal().is_none());
        assert!(!root.is_locked());
    }

    #[test]
    fn modal_holds_scroll_lock() {
        let (mut card, root) = card(None);
        assert!(card.tap(TapTarget::Body));
        assert!(root.is_locked());
        assert_eq!(card.modal().unwrap().post().id, PostId::new("p1"));

        card.close_modal();
        assert!(!root.is_locked());
    }

    #[test]
    fn dropping_card_releases_scroll_lock() {
        let (mut card, root) = card(None);
        card.tap(TapTarget::Body);
        drop(card);

        assert!(!root.is_locked());
    }

    #[test]
    fn navigation_and_engagement_intents() {
        let (card, _) = card(None);
        assert_eq!(card.open_profile(), PostAction::OpenProfile("/user/alice".into()));
        assert_eq!(card.like(), PostAction::Like(PostId::new("p1")));
        assert_eq!(card.comment(), PostAction::Comment(PostId::new("p1")));
    }
}
