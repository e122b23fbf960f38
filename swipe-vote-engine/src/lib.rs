//! # Swipe Vote Engine
//! This crate holds the client-side voting core: the queue of votable items,
//! the drag gesture state machine, and the engine that turns committed
//! gestures into optimistic counter updates, ledger calls, rollbacks and an
//! undo history.
//!
//! ## Modules
//!
//! - [`queue`]: Ordered, de-duplicated items with a non-destructive cursor
//! - [`gesture`]: Drag tracking and the commit/cancel decision
//! - [`engine`]: Commit protocol, undo and restart
//! - [`errors`]: Error types for the engine
pub mod engine;
pub mod errors;
pub mod gesture;
pub mod queue;

pub use engine::{
    CommitReceipt, DragOutcome, EngineConfig, LedgerOp, PendingCommit, Settled, UndoPolicy,
    UndoReceipt, VoteEngine,
};
pub use errors::{EngineError, QueueError};
pub use gesture::{GestureConfig, GestureDecision, GestureState, GestureTracker, Offset, Point};
pub use queue::{ItemQueue, ItemSnapshot};
