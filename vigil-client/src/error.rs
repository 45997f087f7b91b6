//! Client error types

use thiserror::Error;

/// Client error type
///
/// One variant per outcome the wizard has to route on. Transport and
/// application failures are deliberately separate: a transport failure
/// fails the current step without any state change, while the typed
/// domain variants drive the fallback paths (re-read on conflict,
/// re-sync on stale submit).
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (store unreachable, timeout, connection reset)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Store reachable but the response envelope was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Verify step: mobile has no staff directory entry
    #[error("Unknown mobile: {0}")]
    UnknownMobile(String),

    /// Proxy step: one of the two parties has no staff directory entry
    #[error("Unknown staff: {0}")]
    UnknownStaff(String),

    /// No duty record matches the request
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// A concurrent report raced ahead of this one
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Submission attempted with no prior check-in
    #[error("Not reported: {0}")]
    NotReported(String),

    /// Local precondition failed; no store call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store-side internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether re-reading the record can resolve this failure
    pub fn is_recoverable_by_reread(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::NotReported(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reread_recoverability() {
        assert!(ClientError::Conflict("raced".to_string()).is_recoverable_by_reread());
        assert!(ClientError::NotReported("stale".to_string()).is_recoverable_by_reread());
        assert!(!ClientError::UnknownMobile("no entry".to_string()).is_recoverable_by_reread());
        assert!(!ClientError::Validation("too short".to_string()).is_recoverable_by_reread());
    }

    #[test]
    fn test_display_carries_context() {
        let err = ClientError::Conflict("duty for A. Rao is already reported".to_string());
        assert_eq!(
            err.to_string(),
            "Conflict: duty for A. Rao is already reported"
        );
    }
}
