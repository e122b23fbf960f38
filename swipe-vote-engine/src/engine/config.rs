use std::str::FromStr;
use std::time::Duration;

use crate::gesture::GestureConfig;

/// Default bound on a single ledger call.
pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(10);

/// What undoing a committed vote does besides moving back to the item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UndoPolicy {
    /// Restore the item's previous vote locally and in the ledger.
    #[default]
    Compensate,
    /// Only move back to the item; counters and ledger stay as committed.
    Navigate,
}

impl FromStr for UndoPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compensate" => Ok(UndoPolicy::Compensate),
            "navigate" => Ok(UndoPolicy::Navigate),
            other => Err(format!("unknown undo policy: {other}")),
        }
    }
}

/// Configuration for the vote engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub gesture: GestureConfig,
    /// Ledger calls running longer than this fail and roll back. `None`
    /// waits indefinitely.
    pub persist_timeout: Option<Duration>,
    pub undo_policy: UndoPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            persist_timeout: Some(DEFAULT_PERSIST_TIMEOUT),
            undo_policy: UndoPolicy::default(),
        }
    }
}
