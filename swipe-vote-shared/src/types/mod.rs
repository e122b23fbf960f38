mod history;
mod item;
mod sort_order;
mod vote_record;
mod vote_value;
mod votes_delta;

pub use history::HistoryEntry;
pub use item::Item;
pub use sort_order::SortOrder;
pub use vote_record::VoteRecord;
pub use vote_value::{InvalidVoteValue, VoteDirection, VoteValue};
pub use votes_delta::VotesDelta;

/// Opaque, stable identifier of a votable item.
pub type ItemId = uuid::Uuid;

/// Identifier of the authenticated user casting votes.
pub type UserId = uuid::Uuid;
