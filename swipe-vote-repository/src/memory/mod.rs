//! In-memory implementations of the repository traits, used by tests and by
//! the database-less demo mode of the binary.
mod feed_source;
mod vote_ledger;

pub use feed_source::InMemoryFeedSource;
pub use vote_ledger::InMemoryVoteLedger;
