//! Light/dark theme flag with durable persistence.
//!
//! [`ThemeService`] is the only writer. Readers subscribe to a watch channel
//! and see every change.

use glance_core::{PreferenceError, PreferenceStore};
use tokio::sync::watch;

/// Preference key holding the theme name.
pub const THEME_KEY: &str = "theme";

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light scheme.
    Light,
    /// Dark scheme.
    #[default]
    Dark,
}

impl Theme {
    /// Persisted name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other scheme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether this is the dark scheme.
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Owner of the theme flag.
#[derive(Debug)]
pub struct ThemeService<P> {
    store: P,
    tx: watch::Sender<Theme>,
}

impl<P: PreferenceStore> ThemeService<P> {
    /// Read the persisted theme.
    ///
    /// Only the literal `"light"` selects the light scheme. Anything else,
    /// including a missing or unreadable value, selects dark and writes
    /// `"dark"` back.
    pub fn load(mut store: P) -> Self {
        let stored = store.get(THEME_KEY).unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to read theme preference");
            None
        });

        let theme = match stored.as_deref() {
            Some("light") => Theme::Light,
            Some("dark") => Theme::Dark,
            _ => {
                if let Err(error) = store.set(THEME_KEY, Theme::Dark.as_str()) {
                    tracing::warn!(%error, "failed to persist default theme");
                }
                Theme::Dark
            },
        };

        let (tx, _) = watch::channel(theme);
        Self { store, tx }
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        *self.tx.borrow()
    }

    /// Whether the dark scheme is active.
    pub fn is_dark(&self) -> bool {
        self.theme().is_dark()
    }

    /// Flip the theme and persist it.
    ///
    /// The flag flips even when the write fails; the error is returned so
    /// the caller can tell the user the choice will not survive a restart.
    pub fn toggle(&mut self) -> Result<Theme, PreferenceError> {
        let next = self.theme().toggled();
        self.tx.send_replace(next);
        tracing::debug!(theme = next.as_str(), "theme toggled");

        self.store.set(THEME_KEY, next.as_str()).map_err(|error| {
            tracing::warn!(%error, "failed to persist theme");
            error
        })?;
        Ok(next)
    }

    /// Observe theme changes.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }

    /// Backing store.
    pub fn store(&self) -> &P {
        &self.store
    }
}
