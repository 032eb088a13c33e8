//! Domain error types for ChitChat.
//!
//! Every failure the feed engine can report is one of these variants. They
//! carry owned strings so results can be moved across the background task
//! boundary and stored in presentation events.

use thiserror::Error;

/// Failures reported by the feed engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The network call could not be completed.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The response body was not the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The server answered but did not signal success.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// An account identifier had no resolvable structure.
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// The operation was rejected locally before any network call.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// Reading or writing the reaction ledger failed.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// The configured endpoint cannot be used to build requests.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl FeedError {
    pub fn already_reacted(message_id: &str) -> Self {
        FeedError::PreconditionViolation(format!("already reacted to message {message_id}"))
    }

    pub fn reaction_pending(message_id: &str) -> Self {
        FeedError::PreconditionViolation(format!(
            "a reaction to message {message_id} is already in flight"
        ))
    }

    pub fn unknown_message(message_id: &str) -> Self {
        FeedError::PreconditionViolation(format!("message {message_id} is not in the feed"))
    }

    pub fn not_success(operation: &str, reply: &str) -> Self {
        FeedError::Rejected(format!("{operation} was not accepted: {reply}"))
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = FeedError::already_reacted("42");
        assert_eq!(
            err.to_string(),
            "Precondition violated: already reacted to message 42"
        );
    }

    #[test]
    fn test_json_errors_are_malformed_responses() {
        let err: FeedError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, FeedError::MalformedResponse(_)));
    }
}
