use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a signed integer does not map onto a vote.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid vote value: {0}")]
pub struct InvalidVoteValue(pub i16);

/// Represents the vote a user currently holds on an item.
///
/// The ledger only stores `Up` and `Down`; `Neutral` means no record exists.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i16", into = "i16")]
pub enum VoteValue {
    /// Indicates a like.
    Up,
    /// Indicates a dislike.
    Down,
    /// Indicates the absence of a vote.
    #[default]
    Neutral,
}

impl VoteValue {
    /// Signed representation: `1`, `-1` or `0`.
    pub fn as_i16(self) -> i16 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
            VoteValue::Neutral => 0,
        }
    }

    /// Direction of a cast vote, `None` for `Neutral`.
    pub fn direction(self) -> Option<VoteDirection> {
        match self {
            VoteValue::Up => Some(VoteDirection::Like),
            VoteValue::Down => Some(VoteDirection::Dislike),
            VoteValue::Neutral => None,
        }
    }

    /// Applies the toggle rule: requesting the vote already held clears it,
    /// any other request replaces it.
    pub fn toggled_by(self, requested: VoteDirection) -> VoteValue {
        let requested = VoteValue::from(requested);
        if requested == self {
            VoteValue::Neutral
        } else {
            requested
        }
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = InvalidVoteValue;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            0 => Ok(VoteValue::Neutral),
            other => Err(InvalidVoteValue(other)),
        }
    }
}

impl From<VoteValue> for i16 {
    fn from(value: VoteValue) -> Self {
        value.as_i16()
    }
}

/// The two directions a commit can request. Right is a like, left a dislike.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VoteDirection {
    Like,
    Dislike,
}

impl VoteDirection {
    /// Signed representation: `1` for a like, `-1` for a dislike.
    pub fn as_i16(self) -> i16 {
        VoteValue::from(self).as_i16()
    }
}

impl From<VoteDirection> for VoteValue {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Like => VoteValue::Up,
            VoteDirection::Dislike => VoteValue::Down,
        }
    }
}

impl TryFrom<i16> for VoteDirection {
    type Error = InvalidVoteValue;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        VoteValue::try_from(value)?
            .direction()
            .ok_or(InvalidVoteValue(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_conversion() {
        assert_eq!(VoteValue::try_from(1), Ok(VoteValue::Up));
        assert_eq!(VoteValue::try_from(-1), Ok(VoteValue::Down));
        assert_eq!(VoteValue::try_from(0), Ok(VoteValue::Neutral));
        assert_eq!(VoteValue::try_from(2), Err(InvalidVoteValue(2)));
    }

    #[test]
    fn test_direction_rejects_zero() {
        assert_eq!(VoteDirection::try_from(-1), Ok(VoteDirection::Dislike));
        assert_eq!(VoteDirection::try_from(0), Err(InvalidVoteValue(0)));
    }

    #[test]
    fn test_toggle_rule() {
        assert_eq!(VoteValue::Neutral.toggled_by(VoteDirection::Like), VoteValue::Up);
        assert_eq!(VoteValue::Up.toggled_by(VoteDirection::Like), VoteValue::Neutral);
        assert_eq!(VoteValue::Up.toggled_by(VoteDirection::Dislike), VoteValue::Down);
        assert_eq!(VoteValue::Down.toggled_by(VoteDirection::Dislike), VoteValue::Neutral);
    }
}
