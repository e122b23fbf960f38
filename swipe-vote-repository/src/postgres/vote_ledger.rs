use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use swipe_vote_shared::types::{ItemId, UserId, VoteDirection, VoteRecord};
use tracing::{debug, instrument};

use crate::{VoteLedgerClient, VoteLedgerError};

/// PostgreSQL-backed vote ledger.
///
/// Stores one row per `(caption_id, profile_id)` in `caption_votes`. Upserts
/// rely on the primary key conflict target; retracting deletes the row.
pub struct PostgresVoteLedger {
    pool: sqlx::PgPool,
}

impl PostgresVoteLedger {
    /// Creates a new PostgreSQL vote ledger instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, VoteLedgerError> {
        Ok(Self { pool })
    }

    /// Fetches the stored record for `(item_id, user_id)`, if any.
    pub async fn get_record(
        &self,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<Option<VoteRecord>, VoteLedgerError> {
        let row = sqlx::query(
            r#"
            SELECT caption_id, profile_id, vote_value, created_datetime_utc, modified_datetime_utc
            FROM caption_votes
            WHERE caption_id = $1 AND profile_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw_value: i16 = row.try_get("vote_value")?;
        let value = VoteDirection::try_from(raw_value)
            .map_err(|_| VoteLedgerError::InvalidVoteType(raw_value))?;

        Ok(Some(VoteRecord {
            item_id: row.try_get("caption_id")?,
            user_id: row.try_get("profile_id")?,
            value,
            created_at: row.try_get::<DateTime<Utc>, _>("created_datetime_utc")?,
            modified_at: row.try_get::<DateTime<Utc>, _>("modified_datetime_utc")?,
        }))
    }
}

#[async_trait]
impl VoteLedgerClient for PostgresVoteLedger {
    #[instrument(skip(self))]
    async fn upsert(
        &self,
        item_id: ItemId,
        user_id: UserId,
        value: VoteDirection,
    ) -> Result<(), VoteLedgerError> {
        sqlx::query(
            r#"
            INSERT INTO caption_votes (caption_id, profile_id, vote_value, created_datetime_utc, modified_datetime_utc)
            VALUES ($1, $2, $3, now(), now())
            ON CONFLICT (caption_id, profile_id)
            DO UPDATE SET
                vote_value = EXCLUDED.vote_value,
                modified_datetime_utc = now()
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .bind(value.as_i16())
        .execute(&self.pool)
        .await?;

        debug!(%item_id, %user_id, ?value, "Vote record upserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn retract(&self, item_id: ItemId, user_id: UserId) -> Result<(), VoteLedgerError> {
        let result = sqlx::query("DELETE FROM caption_votes WHERE caption_id = $1 AND profile_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        debug!(%item_id, %user_id, rows = result.rows_affected(), "Vote record retracted");
        Ok(())
    }
}
