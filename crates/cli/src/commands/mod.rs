//! Command handlers for the ragtool CLI.

pub mod ask;
pub mod config;

pub use ask::AskCommand;
pub use config::ConfigCommand;
