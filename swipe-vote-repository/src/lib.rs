//! # Swipe Vote Repository
//! This crate provides traits and implementations for the collaborators the
//! vote engine consumes: the vote ledger and the item feed. It includes
//! definitions for errors, interfaces, a PostgreSQL implementation and an
//! in-memory implementation.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::{FeedSourceError, VoteLedgerError};
pub use interfaces::{FeedSource, VoteLedgerClient};
pub use memory::{InMemoryFeedSource, InMemoryVoteLedger};
pub use postgres::{run_migrations, PostgresFeedSource, PostgresVoteLedger};
