//! The ordered set of votable items and the cursor pointing at the current one.
//!
//! Moving the cursor never removes items, so a rewind brings back exactly the
//! item (and its mutated counters) that was left behind.
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use swipe_vote_shared::types::{Item, ItemId, SortOrder, VoteValue, VotesDelta};

use crate::errors::QueueError;

/// Value copy of everything a commit may change, used to roll it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub item_id: ItemId,
    pub user_vote: VoteValue,
    pub like_count: u64,
    pub dislike_count: u64,
    pub cursor: usize,
}

/// Ordered, de-duplicated queue of items that carry media.
#[derive(Debug, Clone, Default)]
pub struct ItemQueue {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
    cursor: usize,
}

impl ItemQueue {
    /// Builds a queue in the given order.
    ///
    /// Items without media are dropped, and only the first occurrence of an
    /// id is kept.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let mut queue = Self::default();
        for item in items.into_iter().filter(Item::has_media) {
            if let Entry::Vacant(slot) = queue.index.entry(item.id) {
                slot.insert(queue.items.len());
                queue.items.push(item);
            }
        }
        queue
    }

    /// Sorts the items before building the queue. Sorting is stable.
    pub fn with_order(mut items: Vec<Item>, order: SortOrder) -> Self {
        match order {
            SortOrder::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Popularity => items.sort_by(|a, b| b.like_count.cmp(&a.like_count)),
            SortOrder::Alphabetical => items.sort_by(|a, b| a.content.cmp(&b.content)),
        }
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item under the cursor, `None` once the queue is exhausted.
    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn get(&self, item_id: ItemId) -> Option<&Item> {
        self.index.get(&item_id).map(|&position| &self.items[position])
    }

    pub fn position(&self, item_id: ItemId) -> Option<usize> {
        self.index.get(&item_id).copied()
    }

    /// Moves to the next item. Stays put once exhausted.
    pub fn advance(&mut self) {
        if self.cursor < self.items.len() {
            self.cursor += 1;
        }
    }

    /// Moves back one item.
    pub fn rewind(&mut self) -> Result<(), QueueError> {
        if self.cursor == 0 {
            return Err(QueueError::AtStart);
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Moves the cursor onto `item_id`.
    pub fn seek(&mut self, item_id: ItemId) -> Result<(), QueueError> {
        self.cursor = self.position(item_id).ok_or(QueueError::UnknownItem(item_id))?;
        Ok(())
    }

    /// Back to the first item. Vote state on the items is kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn apply_vote_delta(&mut self, item_id: ItemId, delta: VotesDelta) -> Result<(), QueueError> {
        self.get_mut(item_id)?.apply_delta(delta);
        Ok(())
    }

    pub fn set_user_vote(&mut self, item_id: ItemId, vote: VoteValue) -> Result<(), QueueError> {
        self.get_mut(item_id)?.user_vote = vote;
        Ok(())
    }

    /// Overwrites an item's counters.
    pub fn set_counts(&mut self, item_id: ItemId, likes: u64, dislikes: u64) -> Result<(), QueueError> {
        let item = self.get_mut(item_id)?;
        item.like_count = likes;
        item.dislike_count = dislikes;
        Ok(())
    }

    pub fn snapshot(&self, item_id: ItemId) -> Result<ItemSnapshot, QueueError> {
        let item = self.get(item_id).ok_or(QueueError::UnknownItem(item_id))?;
        Ok(ItemSnapshot {
            item_id,
            user_vote: item.user_vote,
            like_count: item.like_count,
            dislike_count: item.dislike_count,
            cursor: self.cursor,
        })
    }

    /// Puts an item's vote state and the cursor back to a snapshot.
    pub fn restore(&mut self, snapshot: ItemSnapshot) -> Result<(), QueueError> {
        let item = self.get_mut(snapshot.item_id)?;
        item.user_vote = snapshot.user_vote;
        item.like_count = snapshot.like_count;
        item.dislike_count = snapshot.dislike_count;
        self.cursor = snapshot.cursor.min(self.items.len());
        Ok(())
    }

    fn get_mut(&mut self, item_id: ItemId) -> Result<&mut Item, QueueError> {
        let position = self.position(item_id).ok_or(QueueError::UnknownItem(item_id))?;
        Ok(&mut self.items[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn make_item(content: &str, likes: u64, age_minutes: i64) -> Item {
        Item {
            id: Uuid::new_v4(),
            content: content.to_string(),
            media_url: Some(format!("https://cdn.example/{content}.png")),
            created_at: Utc::now() - Duration::minutes(age_minutes),
            like_count: likes,
            dislike_count: 0,
            user_vote: VoteValue::Neutral,
        }
    }

    #[test]
    fn test_items_without_media_are_dropped() {
        let mut bare = make_item("bare", 0, 0);
        bare.media_url = None;
        let queue = ItemQueue::new(vec![make_item("a", 0, 0), bare.clone()]);

        assert_eq!(queue.len(), 1);
        assert!(queue.get(bare.id).is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first_occurrence() {
        let first = make_item("first", 1, 0);
        let mut duplicate = first.clone();
        duplicate.content = "duplicate".to_string();
        let queue = ItemQueue::new(vec![first.clone(), duplicate]);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(first.id).unwrap().content, "first");
    }

    #[test]
    fn test_advance_is_idempotent_at_the_end() {
        let mut queue = ItemQueue::new(vec![make_item("a", 0, 0)]);
        queue.advance();
        queue.advance();

        assert_eq!(queue.cursor(), 1);
        assert!(queue.is_exhausted());
        assert!(queue.current().is_none());
    }

    #[test]
    fn test_rewind_at_start_fails() {
        let mut queue = ItemQueue::new(vec![make_item("a", 0, 0)]);
        assert_eq!(queue.rewind(), Err(QueueError::AtStart));

        queue.advance();
        queue.rewind().unwrap();
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn test_reset_keeps_vote_state() {
        let item = make_item("a", 5, 0);
        let mut queue = ItemQueue::new(vec![item.clone()]);
        queue.apply_vote_delta(item.id, VotesDelta { likes: 1, dislikes: 0 }).unwrap();
        queue.set_user_vote(item.id, VoteValue::Up).unwrap();
        queue.advance();
        queue.reset();

        let current = queue.current().unwrap();
        assert_eq!(current.like_count, 6);
        assert_eq!(current.user_vote, VoteValue::Up);
    }

    #[test]
    fn test_unknown_item_is_rejected() {
        let mut queue = ItemQueue::new(vec![make_item("a", 0, 0)]);
        let unknown = Uuid::new_v4();

        assert_eq!(
            queue.apply_vote_delta(unknown, VotesDelta::default()),
            Err(QueueError::UnknownItem(unknown))
        );
        assert_eq!(queue.seek(unknown), Err(QueueError::UnknownItem(unknown)));
    }

    #[test]
    fn test_snapshot_restore_is_exact() {
        let item = make_item("a", 3, 0);
        let mut queue = ItemQueue::new(vec![item.clone(), make_item("b", 0, 0)]);
        let snapshot = queue.snapshot(item.id).unwrap();

        queue.apply_vote_delta(item.id, VotesDelta { likes: -1, dislikes: 1 }).unwrap();
        queue.set_user_vote(item.id, VoteValue::Down).unwrap();
        queue.advance();
        queue.restore(snapshot).unwrap();

        assert_eq!(queue.snapshot(item.id).unwrap(), snapshot);
        assert_eq!(queue.current().unwrap().id, item.id);
    }

    #[test]
    fn test_sort_orders() {
        let old_popular = make_item("banana", 10, 30);
        let new_quiet = make_item("cherry", 1, 1);
        let middle = make_item("apple", 5, 10);
        let items = vec![old_popular.clone(), new_quiet.clone(), middle.clone()];

        let newest = ItemQueue::with_order(items.clone(), SortOrder::Newest);
        let ids: Vec<_> = newest.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![new_quiet.id, middle.id, old_popular.id]);

        let popular = ItemQueue::with_order(items.clone(), SortOrder::Popularity);
        assert_eq!(popular.current().unwrap().id, old_popular.id);

        let alphabetical = ItemQueue::with_order(items, SortOrder::Alphabetical);
        assert_eq!(alphabetical.current().unwrap().content, "apple");
        assert_eq!(alphabetical.position(new_quiet.id), Some(2));
    }
}
