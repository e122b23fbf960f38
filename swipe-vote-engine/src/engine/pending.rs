use std::sync::Arc;
use swipe_vote_shared::types::{HistoryEntry, ItemId, UserId, VoteDirection, VoteValue};

use crate::queue::ItemSnapshot;

/// The ledger call a pending commit needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    Upsert(VoteDirection),
    Retract,
}

impl LedgerOp {
    /// The call that leaves the ledger holding `vote`.
    pub fn for_vote(vote: VoteValue) -> LedgerOp {
        match vote.direction() {
            Some(direction) => LedgerOp::Upsert(direction),
            None => LedgerOp::Retract,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingKind {
    Vote,
    Undo { entry: HistoryEntry },
}

/// A commit whose optimistic half has been applied and whose ledger call is
/// still outstanding. Hand it back to [`VoteEngine::settle`](crate::VoteEngine::settle)
/// together with the outcome of the call.
#[derive(Debug)]
#[must_use = "a pending commit keeps the engine busy until it is settled"]
pub struct PendingCommit {
    pub(crate) sequence: u64,
    /// Keeps the engine's in-flight record alive; dropping the commit unsettled
    /// lets the engine roll it back.
    pub(crate) token: Arc<()>,
    pub(crate) kind: PendingKind,
    pub(crate) user_id: UserId,
    pub(crate) previous: VoteValue,
    pub(crate) effective: VoteValue,
    pub(crate) op: Option<LedgerOp>,
    pub(crate) before: ItemSnapshot,
}

impl PendingCommit {
    pub fn item_id(&self) -> ItemId {
        self.before.item_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The ledger call to run, `None` when nothing needs persisting.
    pub fn op(&self) -> Option<LedgerOp> {
        self.op
    }

    pub fn previous_vote(&self) -> VoteValue {
        self.previous
    }

    pub fn effective_vote(&self) -> VoteValue {
        self.effective
    }

    pub fn is_undo(&self) -> bool {
        matches!(self.kind, PendingKind::Undo { .. })
    }
}

/// Result of a successfully persisted vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    pub item_id: ItemId,
    pub previous: VoteValue,
    pub vote: VoteValue,
}

/// Result of a completed undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoReceipt {
    pub item_id: ItemId,
    /// The vote that was undone.
    pub undone: VoteValue,
    /// The vote the item carries now.
    pub restored: VoteValue,
    /// Whether the ledger and counters were reverted too.
    pub compensated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Vote(CommitReceipt),
    Undo(UndoReceipt),
}

/// How a finished drag played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag was running.
    Ignored,
    Cancelled,
    Committed(CommitReceipt),
}
