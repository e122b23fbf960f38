use thiserror::Error;

/// Represents errors that can occur while loading the initial feed.
#[derive(Debug, Error)]
pub enum FeedSourceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Invalid vote type: {0}")]
    InvalidVoteType(i16),

    #[error("Invalid counter value: {0}")]
    InvalidCounter(i64),
}
