//! Redb-backed preference storage.
//!
//! One table of string keys to string values in a single database file.
//! Every `set` is its own write transaction, so a preference survives the
//! process being killed right after the toggle.

use std::{path::Path, sync::Arc};

use glance_core::{PreferenceError, PreferenceStore};
use redb::{Database, TableDefinition};

/// Table: preferences
/// Key: preference name (UTF-8)
/// Value: preference value (UTF-8)
const PREFERENCES: TableDefinition<&str, &str> = TableDefinition::new("preferences");

/// Durable preferences backed by Redb.
///
/// Clone is cheap (Arc); clones share the database.
#[derive(Clone)]
pub struct RedbPreferences {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbPreferences").finish_non_exhaustive()
    }
}

impl RedbPreferences {
    /// Open or create a preference database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError::Io` if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let db = Database::create(path.as_ref()).map_err(io)?;

        let txn = db.begin_write().map_err(io)?;
        {
            let _ = txn.open_table(PREFERENCES).map_err(io)?;
        }
        txn.commit().map_err(io)?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl PreferenceStore for RedbPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let txn = self.db.begin_read().map_err(io)?;
        let table = txn.open_table(PREFERENCES).map_err(io)?;

        let value = table.get(key).map_err(io)?;
        Ok(value.map(|v| v.value().to_owned()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let txn = self.db.begin_write().map_err(io)?;
        {
            let mut table = txn.open_table(PREFERENCES).map_err(io)?;
            table.insert(key, value).map_err(io)?;
        }
        txn.commit().map_err(io)?;

        tracing::debug!(key, value, "preference stored");
        Ok(())
    }
}

fn io(error: impl std::fmt::Display) -> PreferenceError {
    PreferenceError::Io(error.to_string())
}

#[cfg(test)]
mod tests {
    use glance_app::{THEME_KEY, Theme, ThemeService};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let prefs = RedbPreferences::open(dir.path().join("prefs.redb")).unwrap();

        assert_eq!(prefs.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let mut prefs = RedbPreferences::open(dir.path().join("prefs.redb")).unwrap();

        prefs.set(THEME_KEY, "light").unwrap();
        prefs.set(THEME_KEY, "dark").unwrap();

        assert_eq!(prefs.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.redb");

        {
            let mut prefs = RedbPreferences::open(&path).unwrap();
            prefs.set(THEME_KEY, "light").unwrap();
        }

        let prefs = RedbPreferences::open(&path).unwrap();
        assert_eq!(prefs.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn theme_toggle_persists_across_sessions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.redb");

        {
            let mut theme = ThemeService::load(RedbPreferences::open(&path).unwrap());
            assert_eq!(theme.theme(), Theme::Dark);
            assert_eq!(theme.toggle().unwrap(), Theme::Light);
        }

        let theme = ThemeService::load(RedbPreferences::open(&path).unwrap());
        assert_eq!(theme.theme(), Theme::Light);
    }

    #[test]
    fn fresh_database_is_initialized_dark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.redb");

        let theme = ThemeService::load(RedbPreferences::open(&path).unwrap());
        assert!(theme.is_dark());
        assert_eq!(theme.store().get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
