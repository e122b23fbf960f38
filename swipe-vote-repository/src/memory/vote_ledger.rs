use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use swipe_vote_shared::types::{ItemId, UserId, VoteDirection, VoteRecord};

use crate::{VoteLedgerClient, VoteLedgerError};

/// Vote ledger kept in process memory, keyed by `(item_id, user_id)`.
#[derive(Default)]
pub struct InMemoryVoteLedger {
    records: RwLock<HashMap<(ItemId, UserId), VoteRecord>>,
}

impl InMemoryVoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_id: ItemId, user_id: UserId) -> Result<Option<VoteRecord>, VoteLedgerError> {
        let records = self
            .records
            .read()
            .map_err(|_| VoteLedgerError::unavailable("ledger lock poisoned"))?;
        Ok(records.get(&(item_id, user_id)).cloned())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VoteLedgerClient for InMemoryVoteLedger {
    async fn upsert(
        &self,
        item_id: ItemId,
        user_id: UserId,
        value: VoteDirection,
    ) -> Result<(), VoteLedgerError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| VoteLedgerError::unavailable("ledger lock poisoned"))?;
        let now = Utc::now();
        records
            .entry((item_id, user_id))
            .and_modify(|record| {
                record.value = value;
                record.modified_at = now;
            })
            .or_insert_with(|| VoteRecord {
                item_id,
                user_id,
                value,
                created_at: now,
                modified_at: now,
            });
        Ok(())
    }

    async fn retract(&self, item_id: ItemId, user_id: UserId) -> Result<(), VoteLedgerError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| VoteLedgerError::unavailable("ledger lock poisoned"))?;
        records.remove(&(item_id, user_id));
        Ok(())
    }
}
