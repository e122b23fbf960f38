use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order in which the feed is presented.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    Newest,
    /// Most liked first.
    Popularity,
    /// By content, ascending.
    Alphabetical,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" | "date" => Ok(SortOrder::Newest),
            "popularity" | "popular" => Ok(SortOrder::Popularity),
            "alphabetical" | "alpha" => Ok(SortOrder::Alphabetical),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}
