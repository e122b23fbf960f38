use serde::{Deserialize, Serialize};

use crate::types::{ItemId, VoteValue};

/// One committed vote on the undo stack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub item_id: ItemId,
    /// Effective vote left on the item by the commit.
    pub vote: VoteValue,
    /// Vote the item carried before the commit.
    pub previous: VoteValue,
    /// Counters the item carried before the commit. A compensating undo puts
    /// these back as they were, so clamping at zero cannot skew them.
    pub previous_likes: u64,
    pub previous_dislikes: u64,
}
