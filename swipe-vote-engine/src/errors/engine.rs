//! Error types for the vote engine.
//! Only persistence failures are meant to reach the user; every other
//! variant describes an input the presentation layer should simply drop.
use swipe_vote_repository::VoteLedgerError;
use thiserror::Error;

use crate::errors::QueueError;

/// Represents errors returned by vote engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No authenticated user")]
    Unauthenticated,

    #[error("Failed to persist vote: {0}")]
    PersistenceFailure(#[from] VoteLedgerError),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Queue exhausted")]
    QueueExhausted,
}

impl EngineError {
    /// Create an invalid transition error.
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Whether the error should be shown to the user.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::PersistenceFailure(_))
    }
}

impl From<QueueError> for EngineError {
    fn from(err: QueueError) -> Self {
        Self::InvalidTransition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_persistence_failures_are_user_visible() {
        assert!(EngineError::from(VoteLedgerError::unavailable("offline")).is_user_visible());
        assert!(!EngineError::Unauthenticated.is_user_visible());
        assert!(!EngineError::QueueExhausted.is_user_visible());
        assert!(!EngineError::from(QueueError::AtStart).is_user_visible());
    }
}
