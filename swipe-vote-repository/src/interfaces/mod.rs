//! This module defines and re-exports the interfaces for the swipe vote repository.
//! It serves as a central point for accessing traits related to data interaction.
mod feed_source;
mod vote_ledger;

pub use feed_source::FeedSource;
pub use vote_ledger::VoteLedgerClient;
