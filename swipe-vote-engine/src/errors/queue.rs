use swipe_vote_shared::types::ItemId;
use thiserror::Error;

/// Represents errors that can occur while moving through or mutating the item queue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Cannot rewind past the first item")]
    AtStart,
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
}
