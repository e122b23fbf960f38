//! Swipe Vote Application Library
//!
//! Wires the vote engine to its collaborators from environment configuration
//! and provides the line-oriented terminal session used by the binary.

pub mod config;
pub mod errors;
pub mod session;

pub use config::{AppConfig, Dependencies, demo_items};
pub use errors::AppError;
pub use session::{Command, TerminalSession};
