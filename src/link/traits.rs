//! Collaborator traits for the Link handler.
//!
//! The handler never talks to the network or to persisted storage itself.
//! Account status, attestation and feature gates are all injected through
//! these traits.

use std::sync::Arc;

use crate::core::{AccountStatus, AttestationResult, LinkConfiguration};
use crate::error::Result;

/// Device/account integrity check run before Link may launch on its own.
pub trait AttestationCheck: Send + Sync {
    /// Run the check. Every failure mode is reported as a result variant.
    fn invoke(&self) -> AttestationResult;
}

/// Feature gate for Link behavior.
pub trait LinkGate: Send + Sync {
    /// Policy switch that disables the alternate verification modal.
    fn suppress_2fa_modal(&self) -> bool;

    /// Whether attestation endpoints are in use for this configuration.
    fn use_attestation_endpoints(&self) -> bool;
}

/// Hands out the per-configuration collaborators.
pub trait LinkConfigurationCoordinator: Send + Sync {
    /// Feature gate for a configuration.
    fn link_gate(&self, configuration: &LinkConfiguration) -> Arc<dyn LinkGate>;

    /// Attestation check for a configuration.
    fn link_attestation_check(&self, configuration: &LinkConfiguration)
        -> Arc<dyn AttestationCheck>;

    /// Current account status for a configuration.
    fn account_status(&self, configuration: &LinkConfiguration) -> Result<AccountStatus>;
}

impl<T: AttestationCheck + ?Sized> AttestationCheck for Arc<T> {
    fn invoke(&self) -> AttestationResult {
        (**self).invoke()
    }
}

impl<T: LinkGate + ?Sized> LinkGate for Arc<T> {
    fn suppress_2fa_modal(&self) -> bool {
        (**self).suppress_2fa_modal()
    }

    fn use_attestation_endpoints(&self) -> bool {
        (**self).use_attestation_endpoints()
    }
}

/// Blanket implementation so tests can keep a handle on a shared coordinator.
impl<T: LinkConfigurationCoordinator + ?Sized> LinkConfigurationCoordinator for Arc<T> {
    fn link_gate(&self, configuration: &LinkConfiguration) -> Arc<dyn LinkGate> {
        (**self).link_gate(configuration)
    }

    fn link_attestation_check(
        &self,
        configuration: &LinkConfiguration,
    ) -> Arc<dyn AttestationCheck> {
        (**self).link_attestation_check(configuration)
    }

    fn account_status(&self, configuration: &LinkConfiguration) -> Result<AccountStatus> {
        (**self).account_status(configuration)
    }
}
