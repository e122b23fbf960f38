//! The vote engine: owns the session state and runs the commit protocol.
//!
//! A commit is applied to the local queue first, then persisted to the ledger.
//! The two layers only meet in [`VoteEngine::settle`]: success advances the
//! queue and records history, failure restores the value snapshot taken before
//! the optimistic update. At most one commit or undo is in flight at a time.
//! A commit that is given up on, whether through [`VoteEngine::abandon`], a
//! dropped [`PendingCommit`] or a cancelled `vote`/`undo` future, takes the
//! failure path without an error.
mod config;
mod pending;

pub use config::{DEFAULT_PERSIST_TIMEOUT, EngineConfig, UndoPolicy};
pub use pending::{CommitReceipt, DragOutcome, LedgerOp, PendingCommit, Settled, UndoReceipt};

use std::sync::{Arc, Weak};

use swipe_vote_repository::{VoteLedgerClient, VoteLedgerError};
use swipe_vote_shared::types::{HistoryEntry, Item, ItemId, UserId, VoteDirection, VotesDelta};
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::{EngineError, QueueError};
use crate::gesture::{GestureDecision, GestureState, GestureTracker, Offset};
use crate::queue::{ItemQueue, ItemSnapshot};
use pending::PendingKind;

/// The commit or undo whose ledger call is outstanding.
#[derive(Debug)]
struct InFlight {
    sequence: u64,
    /// Dead once the matching `PendingCommit` is gone.
    token: Weak<()>,
    before: ItemSnapshot,
    undone: Option<HistoryEntry>,
}

impl InFlight {
    fn is_abandoned(&self) -> bool {
        self.token.strong_count() == 0
    }
}

/// Owns a pending commit across its ledger call. Dropping it unsettled, as
/// happens when the awaiting future is cancelled, abandons the commit.
struct SettleGuard<'a> {
    engine: &'a mut VoteEngine,
    pending: Option<PendingCommit>,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.engine.abandon(pending);
        }
    }
}

/// Session state for one browsing session plus the protocol that mutates it.
pub struct VoteEngine {
    queue: ItemQueue,
    gesture: GestureTracker,
    history: Vec<HistoryEntry>,
    in_flight: Option<InFlight>,
    next_sequence: u64,
    user_id: Option<UserId>,
    ledger: Arc<dyn VoteLedgerClient>,
    config: EngineConfig,
    last_failure: Option<String>,
}

impl VoteEngine {
    /// Creates an engine over `items` with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `items` - The initial feed; items without media and duplicates are dropped
    /// * `user_id` - The authenticated user, `None` for anonymous sessions
    /// * `ledger` - Where votes are persisted
    pub fn new(items: Vec<Item>, user_id: Option<UserId>, ledger: Arc<dyn VoteLedgerClient>) -> Self {
        Self::with_config(ItemQueue::new(items), user_id, ledger, EngineConfig::default())
    }

    /// Creates an engine over an already built queue with a custom configuration.
    pub fn with_config(
        queue: ItemQueue,
        user_id: Option<UserId>,
        ledger: Arc<dyn VoteLedgerClient>,
        config: EngineConfig,
    ) -> Self {
        Self {
            queue,
            gesture: GestureTracker::new(config.gesture.clone()),
            history: Vec::new(),
            in_flight: None,
            next_sequence: 0,
            user_id,
            ledger,
            config,
            last_failure: None,
        }
    }

    pub fn current(&self) -> Option<&Item> {
        self.queue.current()
    }

    pub fn queue(&self) -> &ItemQueue {
        &self.queue
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn drag_offset(&self) -> Offset {
        self.gesture.offset()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Follows every gesture transition, for renderers.
    pub fn subscribe(&self) -> broadcast::Receiver<GestureState> {
        self.gesture.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_exhausted()
    }

    /// True while a commit or undo is waiting on the ledger.
    pub fn is_busy(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|flight| !flight.is_abandoned())
    }

    pub fn can_undo(&self) -> bool {
        self.is_authenticated() && !self.is_busy() && !self.history.is_empty()
    }

    /// Whether gesture capture should be enabled at all.
    pub fn can_gesture(&self) -> bool {
        self.is_authenticated() && !self.is_busy() && !self.is_exhausted()
    }

    /// Message of the most recent failed ledger call, cleared by the next
    /// successful commit or undo.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn on_drag_start(&mut self, x: f64, y: f64) -> bool {
        self.reclaim_abandoned();
        let allowed = self.can_gesture();
        self.gesture.on_drag_start(x, y, allowed)
    }

    pub fn on_drag_move(&mut self, x: f64, y: f64) -> Option<Offset> {
        self.gesture.on_drag_move(x, y)
    }

    /// Ends the running drag. A drag past the threshold begins a commit on the
    /// current item and returns it; anything else returns `None`.
    pub fn release(&mut self) -> Result<Option<PendingCommit>, EngineError> {
        let GestureDecision::Commit(direction) = self.gesture.on_drag_end() else {
            return Ok(None);
        };

        let begun = match self.queue.current().map(|item| item.id) {
            Some(item_id) => self.begin_commit(item_id, direction),
            None => Err(EngineError::QueueExhausted),
        };
        if begun.is_err() {
            self.gesture.finish();
        }
        begun.map(Some)
    }

    /// Ends the running drag and, when it commits, persists the vote.
    #[instrument(skip(self))]
    pub async fn on_drag_end(&mut self) -> Result<DragOutcome, EngineError> {
        let was_dragging = matches!(self.gesture.state(), GestureState::Dragging { .. });
        match self.release()? {
            Some(pending) => self.drive_vote(pending).await.map(DragOutcome::Committed),
            None if was_dragging => Ok(DragOutcome::Cancelled),
            None => Ok(DragOutcome::Ignored),
        }
    }

    /// Votes on the current item without a gesture.
    pub async fn vote(&mut self, direction: VoteDirection) -> Result<CommitReceipt, EngineError> {
        if !self.is_authenticated() {
            return Err(EngineError::Unauthenticated);
        }
        let item_id = self.queue.current().map(|item| item.id).ok_or(EngineError::QueueExhausted)?;
        self.commit(item_id, direction).await
    }

    /// Commits `direction` on `item_id`, which must be the current item.
    #[instrument(skip(self))]
    pub async fn commit(
        &mut self,
        item_id: ItemId,
        direction: VoteDirection,
    ) -> Result<CommitReceipt, EngineError> {
        let pending = self.begin_commit(item_id, direction)?;
        self.drive_vote(pending).await
    }

    /// Undoes the most recent committed vote and makes its item current again.
    #[instrument(skip(self))]
    pub async fn undo(&mut self) -> Result<UndoReceipt, EngineError> {
        let pending = self.begin_undo()?;
        match self.drive(pending).await? {
            Settled::Undo(receipt) => Ok(receipt),
            Settled::Vote(_) => Err(EngineError::invalid_transition("undo settled as a vote")),
        }
    }

    /// Goes back to the first item. History and the items' vote state are kept.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        if !self.is_authenticated() {
            return Err(EngineError::Unauthenticated);
        }
        self.reclaim_abandoned();
        if self.is_busy() {
            return Err(EngineError::invalid_transition("cannot restart while a commit is in flight"));
        }
        self.queue.reset();
        self.gesture.finish();
        info!(items = self.queue.len(), history = self.history.len(), "Session restarted");
        Ok(())
    }

    /// Applies the optimistic half of a commit.
    ///
    /// The toggle rule turns a repeated direction into an un-vote. Counters and
    /// the item's vote change immediately; the returned [`PendingCommit`] names
    /// the ledger call still to be made and must be passed to [`settle`](Self::settle).
    pub fn begin_commit(
        &mut self,
        item_id: ItemId,
        direction: VoteDirection,
    ) -> Result<PendingCommit, EngineError> {
        let user_id = self.user_id.ok_or(EngineError::Unauthenticated)?;
        self.reclaim_abandoned();
        if self.is_busy() {
            debug!(%item_id, "Commit rejected, another commit is in flight");
            return Err(EngineError::invalid_transition("a commit is already in flight"));
        }
        if matches!(self.gesture.state(), GestureState::Dragging { .. }) {
            debug!(%item_id, "Commit rejected, a drag is in progress");
            return Err(EngineError::invalid_transition("a drag is in progress"));
        }
        let current = self.queue.current().ok_or(EngineError::QueueExhausted)?;
        if current.id != item_id {
            debug!(%item_id, current = %current.id, "Commit rejected, item is not current");
            return Err(EngineError::invalid_transition(format!(
                "item {item_id} is not the current item"
            )));
        }

        let previous = current.user_vote;
        let effective = previous.toggled_by(direction);
        let before = self.queue.snapshot(item_id)?;

        self.queue.apply_vote_delta(item_id, VotesDelta::between(previous, effective))?;
        self.queue.set_user_vote(item_id, effective)?;
        self.gesture.commit(direction);

        let (sequence, token) = self.claim_sequence(before, None);
        debug!(%item_id, ?previous, ?effective, sequence, "Optimistic vote applied");

        Ok(PendingCommit {
            sequence,
            token,
            kind: PendingKind::Vote,
            user_id,
            previous,
            effective,
            op: Some(LedgerOp::for_vote(effective)),
            before,
        })
    }

    /// Applies the local half of an undo.
    ///
    /// Pops the latest history entry and moves back to its item. Under
    /// [`UndoPolicy::Compensate`] the item's previous vote is restored and the
    /// returned commit carries the ledger call that restores it remotely.
    pub fn begin_undo(&mut self) -> Result<PendingCommit, EngineError> {
        let user_id = self.user_id.ok_or(EngineError::Unauthenticated)?;
        self.reclaim_abandoned();
        if self.is_busy() {
            return Err(EngineError::invalid_transition("a commit is already in flight"));
        }
        if !self.gesture.is_idle() {
            return Err(EngineError::invalid_transition("a gesture is in progress"));
        }
        let entry = *self
            .history
            .last()
            .ok_or_else(|| EngineError::invalid_transition("nothing to undo"))?;
        let position = self
            .queue
            .position(entry.item_id)
            .ok_or(QueueError::UnknownItem(entry.item_id))?;

        let before = self.queue.snapshot(entry.item_id)?;
        if position + 1 == self.queue.cursor() {
            self.queue.rewind()?;
        } else {
            self.queue.seek(entry.item_id)?;
        }

        let (effective, op) = match self.config.undo_policy {
            UndoPolicy::Compensate => {
                self.queue
                    .set_counts(entry.item_id, entry.previous_likes, entry.previous_dislikes)?;
                self.queue.set_user_vote(entry.item_id, entry.previous)?;
                (entry.previous, Some(LedgerOp::for_vote(entry.previous)))
            }
            UndoPolicy::Navigate => (before.user_vote, None),
        };

        self.history.pop();
        let (sequence, token) = self.claim_sequence(before, Some(entry));
        debug!(item_id = %entry.item_id, policy = ?self.config.undo_policy, sequence, "Undo applied locally");

        Ok(PendingCommit {
            sequence,
            token,
            kind: PendingKind::Undo { entry },
            user_id,
            previous: before.user_vote,
            effective,
            op,
            before,
        })
    }

    /// Completes a pending commit or undo with the outcome of its ledger call.
    ///
    /// On success a vote is pushed onto the history and the queue advances; an
    /// undo shows its cue. On failure the item and cursor are restored to the
    /// snapshot taken before the optimistic update, an undone history entry is
    /// put back, and a [`EngineError::PersistenceFailure`] is returned.
    pub fn settle(
        &mut self,
        pending: PendingCommit,
        outcome: Result<(), VoteLedgerError>,
    ) -> Result<Settled, EngineError> {
        match self.in_flight.take() {
            Some(flight) if flight.sequence == pending.sequence => {}
            other => {
                self.in_flight = other;
                return Err(EngineError::invalid_transition(
                    "settled commit is not the one in flight",
                ));
            }
        }

        let kind = pending.kind;
        match kind {
            PendingKind::Vote => self.settle_vote(pending, outcome).map(Settled::Vote),
            PendingKind::Undo { entry } => self.settle_undo(pending, entry, outcome).map(Settled::Undo),
        }
    }

    /// Gives up on a pending commit. Its optimistic changes are rolled back
    /// as if the ledger call had failed, and an undone history entry is put
    /// back. A commit that is not the one in flight is ignored.
    pub fn abandon(&mut self, pending: PendingCommit) {
        match self.in_flight.take() {
            Some(flight) if flight.sequence == pending.sequence => self.unwind(flight),
            other => {
                debug!(sequence = pending.sequence, "Abandoned commit is not the one in flight");
                self.in_flight = other;
            }
        }
    }

    async fn drive_vote(&mut self, pending: PendingCommit) -> Result<CommitReceipt, EngineError> {
        match self.drive(pending).await? {
            Settled::Vote(receipt) => Ok(receipt),
            Settled::Undo(_) => Err(EngineError::invalid_transition("vote settled as an undo")),
        }
    }

    /// Persists and settles `pending`. If this future is dropped before the
    /// ledger call returns, the commit is abandoned.
    async fn drive(&mut self, pending: PendingCommit) -> Result<Settled, EngineError> {
        let (op, item_id, user_id) = (pending.op, pending.item_id(), pending.user_id);
        let mut guard = SettleGuard {
            engine: self,
            pending: Some(pending),
        };

        let outcome = guard.engine.persist(op, item_id, user_id).await;
        match guard.pending.take() {
            Some(pending) => guard.engine.settle(pending, outcome),
            None => Err(EngineError::invalid_transition("pending commit already released")),
        }
    }

    /// Runs one ledger call, bounded by the configured timeout.
    async fn persist(
        &self,
        op: Option<LedgerOp>,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<(), VoteLedgerError> {
        let Some(op) = op else {
            return Ok(());
        };

        let call = async {
            match op {
                LedgerOp::Upsert(direction) => self.ledger.upsert(item_id, user_id, direction).await,
                LedgerOp::Retract => self.ledger.retract(item_id, user_id).await,
            }
        };

        match self.config.persist_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| VoteLedgerError::Timeout(limit))?,
            None => call.await,
        }
    }

    fn settle_vote(
        &mut self,
        pending: PendingCommit,
        outcome: Result<(), VoteLedgerError>,
    ) -> Result<CommitReceipt, EngineError> {
        self.gesture.finish();
        if let Err(err) = outcome {
            return Err(self.roll_back(pending.before, err));
        }

        let item_id = pending.item_id();
        self.history.push(HistoryEntry {
            item_id,
            vote: pending.effective,
            previous: pending.previous,
            previous_likes: pending.before.like_count,
            previous_dislikes: pending.before.dislike_count,
        });
        self.queue.advance();
        self.last_failure = None;
        info!(%item_id, previous = ?pending.previous, vote = ?pending.effective, "Vote committed");

        Ok(CommitReceipt {
            item_id,
            previous: pending.previous,
            vote: pending.effective,
        })
    }

    fn settle_undo(
        &mut self,
        pending: PendingCommit,
        entry: HistoryEntry,
        outcome: Result<(), VoteLedgerError>,
    ) -> Result<UndoReceipt, EngineError> {
        if let Err(err) = outcome {
            self.history.push(entry);
            return Err(self.roll_back(pending.before, err));
        }

        if let Some(direction) = entry.vote.direction().or(entry.previous.direction()) {
            self.gesture.cue_undo(direction);
        }
        self.gesture.finish();
        self.last_failure = None;
        info!(item_id = %entry.item_id, undone = ?entry.vote, restored = ?pending.effective, "Vote undone");

        Ok(UndoReceipt {
            item_id: entry.item_id,
            undone: entry.vote,
            restored: pending.effective,
            compensated: pending.op.is_some(),
        })
    }

    fn roll_back(&mut self, before: ItemSnapshot, err: VoteLedgerError) -> EngineError {
        if let Err(restore_err) = self.queue.restore(before) {
            error!(item_id = %before.item_id, error = %restore_err, "Failed to restore item snapshot");
        }
        warn!(item_id = %before.item_id, error = %err, "Ledger call failed, local changes rolled back");
        self.last_failure = Some(err.to_string());
        EngineError::PersistenceFailure(err)
    }

    /// Rolls back an in-flight commit whose `PendingCommit` was dropped
    /// without being settled.
    fn reclaim_abandoned(&mut self) {
        match self.in_flight.take() {
            Some(flight) if flight.is_abandoned() => self.unwind(flight),
            other => self.in_flight = other,
        }
    }

    fn unwind(&mut self, flight: InFlight) {
        if let Some(entry) = flight.undone {
            self.history.push(entry);
        }
        if let Err(err) = self.queue.restore(flight.before) {
            error!(item_id = %flight.before.item_id, error = %err, "Failed to restore item snapshot");
        }
        self.gesture.finish();
        warn!(item_id = %flight.before.item_id, sequence = flight.sequence, "Commit abandoned, local changes rolled back");
    }

    fn claim_sequence(
        &mut self,
        before: ItemSnapshot,
        undone: Option<HistoryEntry>,
    ) -> (u64, Arc<()>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let token = Arc::new(());
        self.in_flight = Some(InFlight {
            sequence,
            token: Arc::downgrade(&token),
            before,
            undone,
        });
        (sequence, token)
    }
}
