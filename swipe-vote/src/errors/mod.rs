//! Error types for the Swipe Vote application.
//! Consolidates errors from the database, the repositories and terminal I/O.
use swipe_vote_repository::{FeedSourceError, VoteLedgerError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Feed error: {0}")]
    Feed(#[from] FeedSourceError),
    #[error("Ledger error: {0}")]
    Ledger(#[from] VoteLedgerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

