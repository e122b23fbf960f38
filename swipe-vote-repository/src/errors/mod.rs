//! Error types for the swipe vote repository.
//! Consolidates and re-exports error types related to ledger and feed operations.
mod feed_source;
mod vote_ledger;

pub use feed_source::FeedSourceError;
pub use vote_ledger::VoteLedgerError;
