use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, UserId, VoteDirection};

/// A user's stored vote on an item.
///
/// At most one record exists per `(item_id, user_id)`. A retracted vote is
/// represented by the absence of a record, never by a zero value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub value: VoteDirection,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
