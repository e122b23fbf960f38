//! Configuration module for the Swipe Vote application.
//! Reads settings from the environment and wires the application's dependencies.
mod dependencies;
mod settings;

pub use dependencies::{demo_items, Dependencies};
pub use settings::AppConfig;
