//! Link handshake handler.
//!
//! Prepares Link for a checkout and decides whether it should be launched
//! eagerly. The handler owns the order in which collaborators are consulted
//! so that nothing runs once the answer is already known: no state means no
//! lookups, suppression means no attestation check.

use std::sync::RwLock;

use crate::core::{
    evaluate, AccountStatus, AttestationResult, GateOutcome, LinkConfiguration, LinkSignupMode,
    LinkState,
};
use crate::error::FailOpen;
use crate::link::traits::LinkConfigurationCoordinator;

/// Handler for Link setup in a payment sheet.
pub struct LinkHandler<C: LinkConfigurationCoordinator> {
    coordinator: C,
    link_enabled: RwLock<Option<bool>>,
}

impl<C: LinkConfigurationCoordinator> LinkHandler<C> {
    /// Create a new handler.
    pub fn new(coordinator: C) -> Self {
        Self {
            coordinator,
            link_enabled: RwLock::new(None),
        }
    }

    /// Whether Link is enabled for the current checkout.
    ///
    /// `None` until `setup_link` has run.
    pub fn is_link_enabled(&self) -> Option<bool> {
        *self
            .link_enabled
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the Link state for the current checkout.
    pub fn setup_link(&self, state: Option<&LinkState>) {
        let enabled = state.is_some();
        *self
            .link_enabled
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(enabled);
        tracing::debug!(link_enabled = enabled, "link setup");
    }

    /// Set up Link and decide whether to launch it eagerly.
    pub fn setup_link_with_eager_launch(&self, state: Option<&LinkState>) -> bool {
        self.eager_launch_outcome(state).launch_eagerly
    }

    /// Set up Link and return the eager-launch decision with its reason.
    pub fn eager_launch_outcome(&self, state: Option<&LinkState>) -> GateOutcome {
        self.setup_link(state);

        let Some(state) = state else {
            return evaluate(None, &AttestationResult::Successful, false);
        };

        let gate = self.coordinator.link_gate(&state.configuration);
        let suppressed = gate.suppress_2fa_modal();

        // Suppression decides on its own; skip the attestation round trip.
        let attestation = if suppressed || !gate.use_attestation_endpoints() {
            AttestationResult::Successful
        } else {
            self.coordinator
                .link_attestation_check(&state.configuration)
                .invoke()
        };

        if let Some(cause) = attestation.cause() {
            tracing::warn!(
                result = attestation.kind(),
                cause = %cause,
                "link attestation did not succeed"
            );
        }

        let outcome = evaluate(Some(state.login_state), &attestation, suppressed);
        tracing::debug!(
            login_state = %state.login_state,
            suppressed,
            launch_eagerly = outcome.launch_eagerly,
            reason = outcome.reason.describe(),
            "link eager launch decision"
        );
        outcome
    }

    /// Resolve Link state from the account-status collaborator.
    ///
    /// A failed lookup counts as an account error, i.e. logged out.
    pub fn resolve_link_state(
        &self,
        configuration: LinkConfiguration,
        signup_mode: LinkSignupMode,
    ) -> LinkState {
        let status = self
            .coordinator
            .account_status(&configuration)
            .fail_open_with("resolving link account status", AccountStatus::Error);
        LinkState::from_account_status(status, signup_mode, configuration)
    }
}
