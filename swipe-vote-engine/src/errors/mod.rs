//! Error types for the swipe vote engine.
mod engine;
mod queue;

pub use engine::EngineError;
pub use queue::QueueError;
