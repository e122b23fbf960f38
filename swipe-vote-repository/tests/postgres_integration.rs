//! Integration tests for the PostgreSQL ledger and feed implementations.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `DATABASE_URL=... cargo test --test postgres_integration -- --ignored`

use swipe_vote_repository::{FeedSource, PostgresFeedSource, PostgresVoteLedger, VoteLedgerClient};
use swipe_vote_shared::types::{VoteDirection, VoteValue};
use uuid::Uuid;

/// Inserts a caption, with an image when `url` is given, and returns its id.
async fn insert_caption(pool: &sqlx::PgPool, content: &str, url: Option<&str>) -> Uuid {
    let image_id = match url {
        Some(url) => {
            let id = Uuid::new_v4();
            sqlx::query("INSERT INTO images (id, url) VALUES ($1, $2)")
                .bind(id)
                .bind(url)
                .execute(pool)
                .await
                .unwrap();
            Some(id)
        }
        None => None,
    };

    let caption_id = Uuid::new_v4();
    sqlx::query("INSERT INTO captions (id, content, image_id) VALUES ($1, $2, $3)")
        .bind(caption_id)
        .bind(content)
        .bind(image_id)
        .execute(pool)
        .await
        .unwrap();
    caption_id
}

// ============================================================================
// Vote Ledger Tests
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_upsert_creates_and_updates_record(pool: sqlx::PgPool) {
    let ledger = PostgresVoteLedger::new(pool.clone()).await.unwrap();
    let caption = insert_caption(&pool, "first", Some("https://cdn.example/1.png")).await;
    let user = Uuid::new_v4();

    ledger.upsert(caption, user, VoteDirection::Like).await.unwrap();
    let created = ledger.get_record(caption, user).await.unwrap().unwrap();
    assert_eq!(created.value, VoteDirection::Like);

    ledger.upsert(caption, user, VoteDirection::Dislike).await.unwrap();
    let updated = ledger.get_record(caption, user).await.unwrap().unwrap();
    assert_eq!(updated.value, VoteDirection::Dislike);
    assert_eq!(updated.created_at, created.created_at);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM caption_votes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_retract_is_idempotent(pool: sqlx::PgPool) {
    let ledger = PostgresVoteLedger::new(pool.clone()).await.unwrap();
    let caption = insert_caption(&pool, "first", Some("https://cdn.example/1.png")).await;
    let user = Uuid::new_v4();

    ledger.upsert(caption, user, VoteDirection::Like).await.unwrap();
    ledger.retract(caption, user).await.unwrap();
    ledger.retract(caption, user).await.unwrap();

    assert!(ledger.get_record(caption, user).await.unwrap().is_none());
}

// ============================================================================
// Feed Source Tests
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_feed_carries_counts_and_own_vote(pool: sqlx::PgPool) {
    let ledger = PostgresVoteLedger::new(pool.clone()).await.unwrap();
    let feed = PostgresFeedSource::new(pool.clone()).await.unwrap();
    let caption = insert_caption(&pool, "counted", Some("https://cdn.example/1.png")).await;
    let (me, other, third) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    ledger.upsert(caption, me, VoteDirection::Dislike).await.unwrap();
    ledger.upsert(caption, other, VoteDirection::Like).await.unwrap();
    ledger.upsert(caption, third, VoteDirection::Like).await.unwrap();

    let items = feed.fetch_initial_items(Some(me)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].like_count, 2);
    assert_eq!(items[0].dislike_count, 1);
    assert_eq!(items[0].user_vote, VoteValue::Down);

    let anonymous = feed.fetch_initial_items(None).await.unwrap();
    assert_eq!(anonymous[0].user_vote, VoteValue::Neutral);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_feed_includes_items_without_media(pool: sqlx::PgPool) {
    let feed = PostgresFeedSource::new(pool.clone()).await.unwrap();
    insert_caption(&pool, "with image", Some("https://cdn.example/1.png")).await;
    insert_caption(&pool, "without image", None).await;

    let items = feed.fetch_initial_items(None).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.iter().filter(|item| item.has_media()).count(), 1);
}
