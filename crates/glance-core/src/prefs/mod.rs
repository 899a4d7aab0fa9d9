//! Durable client-side preferences.
//!
//! A synchronous string key/value store, the equivalent of browser local
//! storage. Reads and writes happen on the UI thread and must be cheap.

mod memory;

pub use memory::MemoryPreferences;

use crate::PreferenceError;

/// Synchronous key/value persistence for small client settings.
pub trait PreferenceStore {
    /// Stored value for `key`. `None` if never written.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}
