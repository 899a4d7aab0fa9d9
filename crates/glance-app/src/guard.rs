//! Session gate in front of authenticated screens.

use glance_core::{AUTH_ROUTE, GatewayError, Identity, Router, SessionProvider};

/// Placeholder shown while the identity check is in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// Lifecycle of a [`SessionGuard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Not mounted yet.
    Idle,
    /// Identity lookup in flight.
    Pending,
    /// Signed in; children render.
    Authorized(Identity),
    /// Sent to the sign-in route; children never render.
    Redirected,
}

/// What the guarded region should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardView<'a> {
    /// Blocking placeholder.
    Loading,
    /// Render children for this identity.
    Content(&'a Identity),
    /// Render nothing.
    Nothing,
}

/// Checks the session once on mount and redirects when signed out.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    state: GuardState,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGuard {
    /// Unmounted guard.
    pub fn new() -> Self {
        Self { state: GuardState::Idle }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Mark the guard mounted.
    ///
    /// Returns `true` exactly once: the caller must then issue the identity
    /// lookup and hand its outcome to [`SessionGuard::resolve`].
    pub fn mount(&mut self) -> bool {
        if self.state != GuardState::Idle {
            return false;
        }
        self.state = GuardState::Pending;
        true
    }

    /// Apply the outcome of the identity lookup.
    ///
    /// A lookup error counts as signed out. Ignored unless pending.
    pub fn resolve<R: Router>(
        &mut self,
        outcome: Result<Option<Identity>, GatewayError>,
        router: &mut R,
    ) {
        if self.state != GuardState::Pending {
            return;
        }

        let identity = outcome.unwrap_or_else(|error| {
            tracing::warn!(%error, "session lookup failed, treating as signed out");
            None
        });

        match identity {
            Some(identity) => {
                tracing::debug!(user = %identity.id, "session authorized");
                self.state = GuardState::Authorized(identity);
            },
            None => {
                router.replace(AUTH_ROUTE);
                self.state = GuardState::Redirected;
            },
        }
    }

    /// Mount and resolve in one step.
    pub async fn check<S, R>(&mut self, provider: &S, router: &mut R)
    where
        S: SessionProvider,
        R: Router,
    {
        if !self.mount() {
            return;
        }
        let outcome = provider.current_identity().await;
        self.resolve(outcome, router);
    }

    /// What to render right now.
    pub fn view(&self) -> GuardView<'_> {
        match &self.state {
            GuardState::Idle | GuardState::Pending => GuardView::Loading,
            GuardState::Authorized(identity) => GuardView::Content(identity),
            GuardState::Redirected => GuardView::Nothing,
        }
    }

    /// Signed-in identity, once resolved.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            GuardState::Authorized(identity) => Some(identity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use glance_core::{HistoryRouter, MemoryGateway};

    use super::*;

    #[tokio::test]
    async fn signed_in_renders_children() {
        let gateway = MemoryGateway::new();
        gateway.set_identity(Some(Identity::new("alice")));
        let mut router = HistoryRouter::new("/");
        let mut guard = SessionGuard::new();

        assert_eq!(guard.view(), GuardView::Loading);
        guard.check(&gateway, &mut router).await;

        assert_eq!(guard.view(), GuardView::Content(&Identity::new("alice")));
        assert_eq!(router.entries().to_vec(), vec!["/".to_owned()]);
    }

    #[tokio::test]
    async fn signed_out_replaces_route() {
        let gateway = MemoryGateway::new();
        let mut router = HistoryRouter::new("/search");
        let mut guard = SessionGuard::new();

        guard.check(&gateway, &mut router).await;

        assert_eq!(guard.view(), GuardView::Nothing);
        assert_eq!(router.entries().to_vec(), vec![AUTH_ROUTE.to_owned()]);
    }

    #[tokio::test]
    async fn checks_only_once() {
        let gateway = MemoryGateway::new();
        gateway.set_identity(Some(Identity::new("alice")));
        let mut router = HistoryRouter::new("/");
        let mut guard = SessionGuard::new();

        guard.check(&gateway, &mut router).await;
        gateway.set_identity(None);
        guard.check(&gateway, &mut router).await;

        assert_eq!(gateway.request_count(), 1);
        assert!(guard.identity().is_some());
    }

    #[test]
    fn lookup_error_redirects() {
        let mut router = HistoryRouter::new("/");
        let mut guard = SessionGuard::new();
        assert!(guard.mount());
        assert!(!guard.mount());

        guard.resolve(Err(GatewayError::Transport("offline".into())), &mut router);

        assert_eq!(guard.state(), &GuardState::Redirected);
        assert_eq!(router.current(), Some(AUTH_ROUTE));
    }

    #[test]
    fn resolve_before_mount_is_ignored() {
        let mut router = HistoryRouter::new("/");
        let mut guard = SessionGuard::new();

        guard.resolve(Ok(None), &mut router);

        assert_eq!(guard.state(), &GuardState::Idle);
        assert_eq!(router.current(), Some("/"));
    }
}
