//! linkgate - Link eager-launch eligibility
//!
//! Decides whether the Link wallet should be opened automatically when a
//! payment sheet loads, drives that decision from the Link handshake
//! handler, and shapes the checkout analytics events reported around it.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod link;

pub use analytics::{EventRecord, PaymentSheetEvent};
pub use config::Config;
pub use crate::core::{
    evaluate, should_launch_eagerly, AttestationResult, EligibilityReason, FailureCause,
    GateOutcome, LinkState, LoginState,
};
pub use error::{LinkGateError, Result};
pub use link::{AttestationCheck, LinkConfigurationCoordinator, LinkGate, LinkHandler};

// CLI commands
pub use cli::{ConfigCommand, EvaluateCommand, EventCommand};
