//! This module defines the `VoteLedgerClient` trait, the interface to the remote
//! store holding one vote record per (item, user).
use swipe_vote_shared::types::{ItemId, UserId, VoteDirection};
use crate::errors::VoteLedgerError;

/// A trait that defines the interface for persisting and retracting vote records.
///
/// Both operations are idempotent: repeating an identical upsert leaves the same
/// record in place, and retracting a record that does not exist is not an error.
#[async_trait::async_trait]
pub trait VoteLedgerClient: Send + Sync {
    /// Creates or replaces the vote record keyed by `(item_id, user_id)`.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The item being voted on.
    /// * `user_id` - The voting user.
    /// * `value` - The vote to store.
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or a `VoteLedgerError` if the write fails.
    async fn upsert(
        &self,
        item_id: ItemId,
        user_id: UserId,
        value: VoteDirection,
    ) -> Result<(), VoteLedgerError>;

    /// Deletes the vote record keyed by `(item_id, user_id)`, if any.
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or a `VoteLedgerError` if the delete fails.
    async fn retract(&self, item_id: ItemId, user_id: UserId) -> Result<(), VoteLedgerError>;
}
