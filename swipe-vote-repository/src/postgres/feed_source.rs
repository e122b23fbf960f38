use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use swipe_vote_shared::types::{Item, UserId, VoteValue};
use tracing::{debug, instrument};

use crate::{FeedSource, FeedSourceError};

/// PostgreSQL-backed feed of captions with their image, aggregate counters
/// and the requesting user's own vote.
pub struct PostgresFeedSource {
    pool: sqlx::PgPool,
}

impl PostgresFeedSource {
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, FeedSourceError> {
        Ok(Self { pool })
    }
}

fn to_counter(value: i64) -> Result<u64, FeedSourceError> {
    u64::try_from(value).map_err(|_| FeedSourceError::InvalidCounter(value))
}

#[async_trait]
impl FeedSource for PostgresFeedSource {
    #[instrument(skip(self))]
    async fn fetch_initial_items(&self, user_id: Option<UserId>) -> Result<Vec<Item>, FeedSourceError> {
        let rows = sqlx::query(
            r#"
            SELECT
                c.id,
                c.content,
                i.url AS media_url,
                c.created_datetime_utc,
                COUNT(v.caption_id) FILTER (WHERE v.vote_value = 1) AS like_count,
                COUNT(v.caption_id) FILTER (WHERE v.vote_value = -1) AS dislike_count,
                COALESCE(MAX(v.vote_value) FILTER (WHERE v.profile_id = $1::uuid), 0)::smallint AS user_vote
            FROM captions c
            LEFT JOIN images i ON i.id = c.image_id
            LEFT JOIN caption_votes v ON v.caption_id = c.id
            GROUP BY c.id, i.url
            ORDER BY c.created_datetime_utc DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let raw_vote: i16 = row.try_get("user_vote")?;
            items.push(Item {
                id: row.try_get("id")?,
                content: row.try_get::<Option<String>, _>("content")?.unwrap_or_default(),
                media_url: row.try_get("media_url")?,
                created_at: row.try_get::<DateTime<Utc>, _>("created_datetime_utc")?,
                like_count: to_counter(row.try_get("like_count")?)?,
                dislike_count: to_counter(row.try_get("dislike_count")?)?,
                user_vote: VoteValue::try_from(raw_vote)
                    .map_err(|_| FeedSourceError::InvalidVoteType(raw_vote))?,
            });
        }

        debug!(count = items.len(), "Feed loaded");
        Ok(items)
    }
}
