use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, VoteValue, VotesDelta};

/// A votable item as loaded from the feed.
///
/// `like_count` and `dislike_count` are independent aggregates computed by the
/// backend at load time; `user_vote` is the requesting user's own vote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub content: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub dislike_count: u64,
    pub user_vote: VoteValue,
}

impl Item {
    /// Only items carrying media are voting material.
    pub fn has_media(&self) -> bool {
        self.media_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    /// Applies a counter delta in place. Counters never drop below zero.
    pub fn apply_delta(&mut self, delta: VotesDelta) {
        self.like_count = self.like_count.saturating_add_signed(delta.likes);
        self.dislike_count = self.dislike_count.saturating_add_signed(delta.dislikes);
    }
}
