//! Evaluate command for linkgate.
//!
//! Runs the eager-launch decision for a given login state and attestation
//! answer, with suppression and attestation endpoints taken from config.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::core::{
    AccountStatus, AttestationResult, EligibilityReason, FailureCause, LinkConfiguration,
    LinkState, LoginState,
};
use crate::error::{LinkGateError, Result};
use crate::link::{LinkHandler, StaticCoordinator};

/// Which answer the attestation check gives, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AttestationKind {
    Successful,
    AttestationFailed,
    Error,
    AccountError,
}

impl AttestationKind {
    /// Build the attestation result, attaching `cause` to a failure.
    ///
    /// A cause only describes a failure, so it is rejected for `Successful`.
    pub fn into_result(self, cause: Option<String>) -> Result<AttestationResult> {
        if self == Self::Successful {
            return match cause {
                Some(_) => Err(LinkGateError::input(
                    "--cause requires a failed --attestation result",
                )),
                None => Ok(AttestationResult::Successful),
            };
        }

        let cause = FailureCause::new(cause.unwrap_or_else(|| "unspecified".to_string()));
        Ok(match self {
            Self::Successful => AttestationResult::Successful,
            Self::AttestationFailed => AttestationResult::AttestationFailed(cause),
            Self::Error => AttestationResult::Error(cause),
            Self::AccountError => AttestationResult::AccountError(cause),
        })
    }
}

/// Options for the evaluate command.
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Login state, or `None` when no Link state was resolved.
    pub login_state: Option<LoginState>,
    /// Answer the attestation check gives if it runs.
    pub attestation: AttestationResult,
    /// Force the suppression switch on regardless of config.
    pub suppressed: bool,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            json: false,
            quiet: false,
            login_state: Some(LoginState::LoggedOut),
            attestation: AttestationResult::Successful,
            suppressed: false,
        }
    }
}

/// Output format for the evaluate command.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateOutput {
    /// Whether Link should be launched eagerly.
    pub launch_eagerly: bool,
    /// Rule that decided.
    pub reason: EligibilityReason,
    /// Login state evaluated, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_state: Option<LoginState>,
    /// Whether Link is enabled after setup.
    pub link_enabled: bool,
    /// Number of attestation checks that actually ran.
    pub attestation_checks: usize,
    pub evaluated_at: DateTime<Utc>,
}

/// The evaluate command implementation.
pub struct EvaluateCommand {
    config: Config,
}

impl EvaluateCommand {
    /// Create a new evaluate command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the evaluate command.
    pub fn run(&self, options: &EvaluateOptions) -> EvaluateOutput {
        let mut config = self.config.clone();
        config.link.suppress_2fa_modal |= options.suppressed;
        let signup_mode = config.link.signup_mode;

        let coordinator = Arc::new(StaticCoordinator::new(
            config,
            options.attestation.clone(),
            Some(AccountStatus::Verified),
        ));
        let handler = LinkHandler::new(Arc::clone(&coordinator));

        let state = options
            .login_state
            .map(|login_state| LinkState::new(login_state, signup_mode, LinkConfiguration::default()));
        let outcome = handler.eager_launch_outcome(state.as_ref());

        EvaluateOutput {
            launch_eagerly: outcome.launch_eagerly,
            reason: outcome.reason,
            login_state: options.login_state,
            link_enabled: handler.is_link_enabled().unwrap_or(false),
            attestation_checks: coordinator.attestation_invocations(),
            evaluated_at: Utc::now(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &EvaluateOutput, options: &EvaluateOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &EvaluateOutput) -> String {
        let decision = if output.launch_eagerly {
            "launch Link eagerly"
        } else {
            "present Link normally"
        };
        let state = output
            .login_state
            .map(|s| s.as_str())
            .unwrap_or("none");

        format!(
            "Decision: {}\nReason: {}\nLogin state: {}\nAttestation checks run: {}\n",
            decision,
            output.reason.describe(),
            state,
            output.attestation_checks
        )
    }
}
