//! # Swipe Vote Shared
//! This crate defines shared data structures and types used across the swipe vote ecosystem.
//! It includes common definitions for votable items, vote values, ledger records, counter
//! deltas and the undo history.
pub mod types;
