use swipe_vote_shared::types::{Item, UserId};
use crate::errors::FeedSourceError;

/// Supplies the initial list of items for a browsing session.
///
/// Each returned item already carries the aggregate counters and the
/// requesting user's own vote (`Neutral` for anonymous requests).
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_initial_items(&self, user_id: Option<UserId>) -> Result<Vec<Item>, FeedSourceError>;
}
