//! Dependency initialization and wiring for the swipe vote session.

use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use swipe_vote_engine::{ItemQueue, VoteEngine};
use swipe_vote_repository::{
    FeedSource, InMemoryFeedSource, InMemoryVoteLedger, PostgresFeedSource, PostgresVoteLedger,
    VoteLedgerClient, run_migrations,
};
use swipe_vote_shared::types::{Item, VoteValue};

use crate::config::AppConfig;
use crate::errors::AppError;

/// Container for the collaborators the engine is built from.
pub struct Dependencies {
    pub config: AppConfig,
    pub ledger: Arc<dyn VoteLedgerClient>,
    pub feed: Arc<dyn FeedSource>,
}

impl Dependencies {
    /// Connects the ledger and feed described by `config`.
    ///
    /// With a `database_url` both are backed by PostgreSQL and the schema
    /// migrations are applied first. Without one, a small in-memory demo
    /// feed is served and votes are kept in memory.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the database cannot be reached or migrated
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        let (ledger, feed): (Arc<dyn VoteLedgerClient>, Arc<dyn FeedSource>) =
            match config.database_url.as_deref() {
                Some(database_url) => {
                    let pool = sqlx::PgPool::connect(database_url).await?;
                    run_migrations(&pool).await?;
                    info!("PostgreSQL connection established");

                    let ledger = PostgresVoteLedger::new(pool.clone()).await?;
                    let feed = PostgresFeedSource::new(pool).await?;
                    (Arc::new(ledger), Arc::new(feed))
                }
                None => {
                    info!("DATABASE_URL not set, serving in-memory demo feed");
                    (
                        Arc::new(InMemoryVoteLedger::new()),
                        Arc::new(InMemoryFeedSource::new(demo_items())),
                    )
                }
            };

        Ok(Self {
            config,
            ledger,
            feed,
        })
    }

    /// Loads the initial feed and builds the engine for the configured user.
    pub async fn build_engine(&self) -> Result<VoteEngine, AppError> {
        let items = self.feed.fetch_initial_items(self.config.user_id).await?;
        let queue = ItemQueue::with_order(items, self.config.sort_order);

        info!(
            items = queue.len(),
            sort_order = ?self.config.sort_order,
            authenticated = self.config.user_id.is_some(),
            "Feed loaded"
        );

        Ok(VoteEngine::with_config(
            queue,
            self.config.user_id,
            self.ledger.clone(),
            self.config.engine.clone(),
        ))
    }
}

/// Captions used when no database is configured.
pub fn demo_items() -> Vec<Item> {
    let now = Utc::now();
    let captions = [
        ("When the build passes on the first try", "https://picsum.photos/id/237/600/400", 12, 3),
        ("Monday morning standup energy", "https://picsum.photos/id/1025/600/400", 8, 1),
        ("Me explaining the bug I introduced", "https://picsum.photos/id/1062/600/400", 21, 6),
        ("Deploying on a Friday", "https://picsum.photos/id/433/600/400", 4, 9),
        ("The intern found the memory leak", "https://picsum.photos/id/1074/600/400", 15, 2),
    ];

    captions
        .into_iter()
        .enumerate()
        .map(|(i, (content, url, likes, dislikes))| Item {
            id: Uuid::new_v4(),
            content: content.to_string(),
            media_url: Some(url.to_string()),
            created_at: now - ChronoDuration::minutes(i as i64 * 30),
            like_count: likes,
            dislike_count: dislikes,
            user_vote: VoteValue::Neutral,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipe_vote_engine::EngineConfig;
    use swipe_vote_shared::types::SortOrder;

    fn demo_config(user_id: Option<Uuid>) -> AppConfig {
        AppConfig {
            database_url: None,
            user_id,
            sort_order: SortOrder::Newest,
            engine: EngineConfig::default(),
        }
    }

    #[test]
    fn test_demo_items_are_votable() {
        let items = demo_items();

        assert!(!items.is_empty());
        assert!(items.iter().all(Item::has_media));
        assert!(items.iter().all(|item| item.user_vote == VoteValue::Neutral));
    }

    #[tokio::test]
    async fn test_in_memory_dependencies_build_engine() {
        let user = Uuid::new_v4();
        let deps = Dependencies::new(demo_config(Some(user))).await.unwrap();

        let engine = deps.build_engine().await.unwrap();

        assert_eq!(engine.queue().len(), demo_items().len());
        assert_eq!(engine.user_id(), Some(user));
        assert!(engine.is_authenticated());
        assert!(engine.can_gesture());
    }

    #[tokio::test]
    async fn test_anonymous_session_cannot_gesture() {
        let deps = Dependencies::new(demo_config(None)).await.unwrap();

        let engine = deps.build_engine().await.unwrap();

        assert!(!engine.is_authenticated());
        assert!(!engine.can_gesture());
        assert!(engine.current().is_some());
    }

    #[tokio::test]
    async fn test_invalid_database_url_fails() {
        let mut config = demo_config(None);
        config.database_url = Some("invalid-database-url".to_string());

        let result = Dependencies::new(config).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
