//! Drag gesture state machine.
//!
//! The tracker owns the gesture state; renderers read it through
//! [`GestureTracker::state`] or follow every transition through
//! [`GestureTracker::subscribe`]. Only the horizontal offset decides between
//! a commit and a cancel; the vertical offset is carried for rendering.
use swipe_vote_shared::types::VoteDirection;
use tokio::sync::broadcast;
use tracing::debug;

/// Horizontal distance a drag must exceed to commit.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 120.0;

const TRANSITION_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement of the pointer from the drag anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { anchor: Point, offset: Offset },
    /// A vote in `direction` has been decided and is being committed.
    Committing { direction: VoteDirection },
    /// The drag ended inside the threshold and snaps back.
    Cancelling,
    /// Transient cue shown while a vote in `direction` is undone.
    Undoing { direction: VoteDirection },
}

/// What the end of a drag resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDecision {
    Commit(VoteDirection),
    Cancel,
    /// No drag was in progress.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct GestureConfig {
    pub swipe_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

pub struct GestureTracker {
    config: GestureConfig,
    state: GestureState,
    transitions: broadcast::Sender<GestureState>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            config,
            state: GestureState::Idle,
            transitions,
        }
    }

    /// Receives every state the tracker enters from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<GestureState> {
        self.transitions.subscribe()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Current drag offset, zero whenever no drag is in progress.
    pub fn offset(&self) -> Offset {
        match self.state {
            GestureState::Dragging { offset, .. } => offset,
            _ => Offset::ZERO,
        }
    }

    /// Starts a drag anchored at `(x, y)`.
    ///
    /// Only leaves `Idle`, and only when `allowed`; calls made while a drag is
    /// already running are ignored. Returns whether a drag started.
    pub fn on_drag_start(&mut self, x: f64, y: f64, allowed: bool) -> bool {
        if !allowed || !self.is_idle() {
            debug!(allowed, state = ?self.state, "Drag start ignored");
            return false;
        }
        self.transition(GestureState::Dragging {
            anchor: Point::new(x, y),
            offset: Offset::ZERO,
        });
        true
    }

    /// Updates the offset of a running drag and returns it.
    pub fn on_drag_move(&mut self, x: f64, y: f64) -> Option<Offset> {
        let GestureState::Dragging { anchor, .. } = self.state else {
            return None;
        };
        let offset = Offset {
            x: x - anchor.x,
            y: y - anchor.y,
        };
        self.set_state(GestureState::Dragging { anchor, offset });
        Some(offset)
    }

    /// Ends a drag and decides its outcome.
    ///
    /// A commit leaves the tracker in `Committing` until [`finish`](Self::finish)
    /// is called; a cancel passes through `Cancelling` straight back to `Idle`.
    pub fn on_drag_end(&mut self) -> GestureDecision {
        let GestureState::Dragging { offset, .. } = self.state else {
            return GestureDecision::Ignored;
        };

        let threshold = self.config.swipe_threshold;
        let decision = if offset.x > threshold {
            GestureDecision::Commit(VoteDirection::Like)
        } else if offset.x < -threshold {
            GestureDecision::Commit(VoteDirection::Dislike)
        } else {
            GestureDecision::Cancel
        };

        match decision {
            GestureDecision::Commit(direction) => {
                self.transition(GestureState::Committing { direction });
            }
            _ => {
                self.transition(GestureState::Cancelling);
                self.transition(GestureState::Idle);
            }
        }
        decision
    }

    /// Enters `Committing` for a vote that did not come from a drag.
    pub fn commit(&mut self, direction: VoteDirection) {
        if self.is_idle() {
            self.transition(GestureState::Committing { direction });
        }
    }

    /// Shows the undo cue, then returns to neutral.
    pub fn cue_undo(&mut self, direction: VoteDirection) {
        self.transition(GestureState::Undoing { direction });
        self.transition(GestureState::Idle);
    }

    /// Returns to `Idle` from any state.
    pub fn finish(&mut self) {
        if !self.is_idle() {
            self.transition(GestureState::Idle);
        }
    }

    fn transition(&mut self, next: GestureState) {
        debug!(from = ?self.state, to = ?next, "Gesture transition");
        self.set_state(next);
    }

    fn set_state(&mut self, next: GestureState) {
        self.state = next;
        // No subscribers is fine.
        let _ = self.transitions.send(next);
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(tracker: &mut GestureTracker, dx: f64, dy: f64) -> GestureDecision {
        assert!(tracker.on_drag_start(10.0, 20.0, true));
        tracker.on_drag_move(10.0 + dx, 20.0 + dy);
        tracker.on_drag_end()
    }

    #[test]
    fn test_right_drag_past_threshold_likes() {
        let mut tracker = GestureTracker::default();
        assert_eq!(drag(&mut tracker, 121.0, 0.0), GestureDecision::Commit(VoteDirection::Like));
        assert_eq!(tracker.state(), GestureState::Committing { direction: VoteDirection::Like });
    }

    #[test]
    fn test_left_drag_past_threshold_dislikes() {
        let mut tracker = GestureTracker::default();
        assert_eq!(drag(&mut tracker, -200.0, 0.0), GestureDecision::Commit(VoteDirection::Dislike));
    }

    #[test]
    fn test_drag_at_threshold_cancels() {
        let mut tracker = GestureTracker::default();
        assert_eq!(drag(&mut tracker, 120.0, 0.0), GestureDecision::Cancel);
        assert_eq!(tracker.state(), GestureState::Idle);
        assert_eq!(tracker.offset(), Offset::ZERO);
    }

    #[test]
    fn test_vertical_offset_never_commits() {
        let mut tracker = GestureTracker::default();
        assert_eq!(drag(&mut tracker, 30.0, 500.0), GestureDecision::Cancel);
    }

    #[test]
    fn test_move_reports_offset_from_anchor() {
        let mut tracker = GestureTracker::default();
        tracker.on_drag_start(100.0, 100.0, true);
        let offset = tracker.on_drag_move(140.0, 90.0).unwrap();

        assert_eq!(offset, Offset { x: 40.0, y: -10.0 });
        assert_eq!(tracker.offset(), offset);
    }

    #[test]
    fn test_disallowed_start_stays_idle() {
        let mut tracker = GestureTracker::default();
        assert!(!tracker.on_drag_start(0.0, 0.0, false));
        assert!(tracker.on_drag_move(500.0, 0.0).is_none());
        assert_eq!(tracker.on_drag_end(), GestureDecision::Ignored);
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_reentrant_start_keeps_original_anchor() {
        let mut tracker = GestureTracker::default();
        tracker.on_drag_start(0.0, 0.0, true);
        assert!(!tracker.on_drag_start(50.0, 50.0, true));

        let offset = tracker.on_drag_move(60.0, 0.0).unwrap();
        assert_eq!(offset.x, 60.0);
    }

    #[test]
    fn test_committing_blocks_new_drag_until_finished() {
        let mut tracker = GestureTracker::default();
        drag(&mut tracker, 300.0, 0.0);
        assert!(!tracker.on_drag_start(0.0, 0.0, true));

        tracker.finish();
        assert!(tracker.on_drag_start(0.0, 0.0, true));
    }

    #[test]
    fn test_custom_threshold() {
        let mut tracker = GestureTracker::new(GestureConfig { swipe_threshold: 40.0 });
        assert_eq!(drag(&mut tracker, 41.0, 0.0), GestureDecision::Commit(VoteDirection::Like));
    }

    #[test]
    fn test_subscribers_see_cancel_and_undo_cues() {
        let mut tracker = GestureTracker::default();
        let mut transitions = tracker.subscribe();

        drag(&mut tracker, 10.0, 0.0);
        tracker.cue_undo(VoteDirection::Dislike);

        let mut seen = Vec::new();
        while let Ok(state) = transitions.try_recv() {
            seen.push(state);
        }

        assert!(matches!(seen[0], GestureState::Dragging { .. }));
        assert!(seen.contains(&GestureState::Cancelling));
        assert!(seen.contains(&GestureState::Undoing { direction: VoteDirection::Dislike }));
        assert_eq!(seen.last(), Some(&GestureState::Idle));
    }
}
