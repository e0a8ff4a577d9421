//! Core types and logic for linkgate.
//!
//! This module contains the Link state model and the eager-launch
//! eligibility gate that reads it.

pub mod gate;
pub mod state;

pub use gate::{evaluate, should_launch_eagerly, EligibilityReason, GateOutcome};
pub use state::{
    AccountStatus, AttestationResult, FailureCause, LinkConfiguration, LinkSignupMode, LinkState,
    LoginState, SUPPRESS_2FA_MODAL_FLAG,
};
