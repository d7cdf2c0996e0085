//! Sync engine error taxonomy.

use thiserror::Error;

/// Errors that can occur while syncing a collection.
///
/// Three families, handled differently by the reconcilers:
/// - [`SyncError::Unauthorized`] during init drives the Guest-tier
///   fallback and is not an error from the user's point of view.
/// - Network/remote failures during a mutation trigger a local rollback
///   and are logged only.
/// - Local storage failures (I/O, corrupt JSON) degrade to an empty
///   collection; they never abort initialization.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the session credential (401).
    #[error("not authenticated")]
    Unauthorized,

    /// The server answered with an unexpected status code.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// A payload could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The local store failed to read or write.
    #[error("local storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl SyncError {
    /// True when this error means "no valid session", as opposed to a
    /// transport or server failure.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_classification() {
        assert!(SyncError::Unauthorized.is_unauthorized());
        assert!(!SyncError::Status(500).is_unauthorized());
    }

    #[test]
    fn test_display() {
        assert_eq!(SyncError::Status(502).to_string(), "unexpected status: 502");
        assert_eq!(SyncError::Unauthorized.to_string(), "not authenticated");
    }
}
