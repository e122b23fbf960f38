use async_trait::async_trait;
use std::collections::HashMap;
use swipe_vote_shared::types::{Item, ItemId, UserId, VoteValue};

use crate::{FeedSource, FeedSourceError};

/// A fixed feed held in memory.
///
/// Counters are served as given. Per-user votes registered with
/// [`InMemoryFeedSource::with_user_vote`] are attached to the items returned
/// for that user; everyone else sees `Neutral`.
#[derive(Default)]
pub struct InMemoryFeedSource {
    items: Vec<Item>,
    user_votes: HashMap<(UserId, ItemId), VoteValue>,
}

impl InMemoryFeedSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            user_votes: HashMap::new(),
        }
    }

    pub fn with_user_vote(mut self, user_id: UserId, item_id: ItemId, vote: VoteValue) -> Self {
        self.user_votes.insert((user_id, item_id), vote);
        self
    }
}

#[async_trait]
impl FeedSource for InMemoryFeedSource {
    async fn fetch_initial_items(&self, user_id: Option<UserId>) -> Result<Vec<Item>, FeedSourceError> {
        Ok(self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                item.user_vote = user_id
                    .and_then(|user| self.user_votes.get(&(user, item.id)).copied())
                    .unwrap_or(VoteValue::Neutral);
                item
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_item() -> Item {
        Item {
            id: Uuid::new_v4(),
            content: "caption".to_string(),
            media_url: Some("https://cdn.example/a.png".to_string()),
            created_at: Utc::now(),
            like_count: 4,
            dislike_count: 1,
            user_vote: VoteValue::Up,
        }
    }

    #[tokio::test]
    async fn test_user_votes_are_scoped_to_requester() {
        let item = make_item();
        let user = Uuid::new_v4();
        let feed = InMemoryFeedSource::new(vec![item.clone()]).with_user_vote(user, item.id, VoteValue::Down);

        let own = feed.fetch_initial_items(Some(user)).await.unwrap();
        let other = feed.fetch_initial_items(Some(Uuid::new_v4())).await.unwrap();
        let anonymous = feed.fetch_initial_items(None).await.unwrap();

        assert_eq!(own[0].user_vote, VoteValue::Down);
        assert_eq!(other[0].user_vote, VoteValue::Neutral);
        assert_eq!(anonymous[0].user_vote, VoteValue::Neutral);
        assert_eq!(own[0].like_count, 4);
    }
}
