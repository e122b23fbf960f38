use serde::{Deserialize, Serialize};

use crate::types::VoteValue;

/// Change applied to an item's like and dislike counters by one vote transition.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VotesDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl VotesDelta {
    /// Computes the counter change for a user moving from `previous` to `next`.
    ///
    /// A direct flip touches both counters; every other transition touches at
    /// most one. Unchanged votes produce a zero delta.
    pub fn between(previous: VoteValue, next: VoteValue) -> VotesDelta {
        let (likes, dislikes) = match (previous, next) {
            (VoteValue::Up, VoteValue::Down) => (-1, 1),
            (VoteValue::Up, VoteValue::Neutral) => (-1, 0),
            (VoteValue::Down, VoteValue::Up) => (1, -1),
            (VoteValue::Down, VoteValue::Neutral) => (0, -1),
            (VoteValue::Neutral, VoteValue::Up) => (1, 0),
            (VoteValue::Neutral, VoteValue::Down) => (0, 1),
            (_, _) => (0, 0),
        };

        VotesDelta { likes, dislikes }
    }
}
