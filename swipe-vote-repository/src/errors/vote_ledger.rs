//! Error types for the vote ledger.
//! Defines specific errors that can occur while persisting or retracting a vote record.
use std::time::Duration;
use thiserror::Error;

/// Represents errors that can occur within the vote ledger.
#[derive(Debug, Error)]
pub enum VoteLedgerError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    #[error("Ledger call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid vote type: {0}")]
    InvalidVoteType(i16),
}

impl VoteLedgerError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
