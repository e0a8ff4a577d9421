//! CLI commands for linkgate.
//!
//! - **evaluate**: run the eager-launch decision
//! - **event**: render an analytics event from JSON
//! - **config**: show or initialize configuration

pub mod config_cmd;
pub mod evaluate;
pub mod event;

pub use config_cmd::ConfigCommand;
pub use evaluate::EvaluateCommand;
pub use event::EventCommand;
