//! Error types for collaborator calls.
//!
//! Strongly-typed errors for the two kinds of external state the client
//! touches: the remote gateway (rows, blobs, sessions) and durable local
//! preferences.

use thiserror::Error;

/// Errors returned by the remote data gateway, blob store, or session
/// provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend rejected the request.
    #[error("remote error {code}: {message}")]
    Remote {
        /// Backend error code.
        code: String,
        /// Backend error message.
        message: String,
    },

    /// The addressed row or object does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Resource kind ("story", "post", "object").
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Row-level policy denied the operation for the current session.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The request never reached the backend or the response was lost.
    #[error("transport error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Returns true if the same request might succeed later.
    ///
    /// Nothing in the client retries automatically; this only shapes the
    /// wording shown to the user.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors from durable client-side preference storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    /// Underlying storage failed.
    #[error("preference I/O error: {0}")]
    Io(String),

    /// A stored value could not be decoded.
    #[error("corrupt preference value for key {key}")]
    Corrupt {
        /// Key whose value was unreadable.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_transient() {
        assert!(GatewayError::Transport("reset".into()).is_transient());

        assert!(!GatewayError::Unauthorized("rls".into()).is_transient());
        assert!(!GatewayError::NotFound { kind: "story", id: "s1".into() }.is_transient());
        assert!(
            !GatewayError::Remote { code: "23503".into(), message: "fk".into() }.is_transient()
        );
    }

    #[test]
    fn messages_name_the_resource() {
        let err = GatewayError::NotFound { kind: "story", id: "s1".into() };
        assert_eq!(err.to_string(), "story not found: s1");
    }
}
