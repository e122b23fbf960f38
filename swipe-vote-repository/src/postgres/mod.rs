//! PostgreSQL implementation of the swipe vote repository.
//!
//! ## Database Tables
//!
//! - `images`: Media referenced by captions
//! - `captions`: The votable items
//! - `caption_votes`: One vote record per (caption, profile), upserted in place
mod feed_source;
mod vote_ledger;

pub use feed_source::PostgresFeedSource;
pub use vote_ledger::PostgresVoteLedger;

/// Applies the bundled schema migrations to `pool`.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("src/postgres/migrations").run(pool).await
}
