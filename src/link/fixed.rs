//! Fixed-answer collaborators.
//!
//! Used by the CLI, where every input comes from flags and config, and by
//! tests. Each collaborator counts how often it was consulted so callers can
//! check which steps were short-circuited.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::core::{
    AccountStatus, AttestationResult, LinkConfiguration, SUPPRESS_2FA_MODAL_FLAG,
};
use crate::error::{LinkGateError, Result};
use crate::link::traits::{AttestationCheck, LinkConfigurationCoordinator, LinkGate};

/// Attestation check that always returns the same result.
#[derive(Debug)]
pub struct StaticAttestationCheck {
    result: AttestationResult,
    invocations: AtomicUsize,
}

impl StaticAttestationCheck {
    pub fn new(result: AttestationResult) -> Self {
        Self {
            result,
            invocations: AtomicUsize::new(0),
        }
    }

    /// Number of times `invoke` ran.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl AttestationCheck for StaticAttestationCheck {
    fn invoke(&self) -> AttestationResult {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Feature gate with fixed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticLinkGate {
    pub suppress_2fa_modal: bool,
    pub use_attestation_endpoints: bool,
}

impl Default for StaticLinkGate {
    fn default() -> Self {
        Self {
            suppress_2fa_modal: false,
            use_attestation_endpoints: true,
        }
    }
}

impl LinkGate for StaticLinkGate {
    fn suppress_2fa_modal(&self) -> bool {
        self.suppress_2fa_modal
    }

    fn use_attestation_endpoints(&self) -> bool {
        self.use_attestation_endpoints
    }
}

/// Coordinator built from config plus fixed attestation and account answers.
///
/// Suppression is on when either the config or the configuration's server
/// flag says so.
#[derive(Debug)]
pub struct StaticCoordinator {
    config: Config,
    attestation: Arc<StaticAttestationCheck>,
    account_status: Option<AccountStatus>,
    gate_lookups: AtomicUsize,
}

impl StaticCoordinator {
    /// Create a coordinator. A `None` account status makes lookups fail.
    pub fn new(
        config: Config,
        attestation: AttestationResult,
        account_status: Option<AccountStatus>,
    ) -> Self {
        Self {
            config,
            attestation: Arc::new(StaticAttestationCheck::new(attestation)),
            account_status,
            gate_lookups: AtomicUsize::new(0),
        }
    }

    /// Number of times the attestation check ran.
    pub fn attestation_invocations(&self) -> usize {
        self.attestation.invocations()
    }

    /// Number of times a feature gate was handed out.
    pub fn gate_lookups(&self) -> usize {
        self.gate_lookups.load(Ordering::SeqCst)
    }
}

impl LinkConfigurationCoordinator for StaticCoordinator {
    fn link_gate(&self, configuration: &LinkConfiguration) -> Arc<dyn LinkGate> {
        self.gate_lookups.fetch_add(1, Ordering::SeqCst);
        Arc::new(StaticLinkGate {
            suppress_2fa_modal: self.config.link.suppress_2fa_modal
                || configuration.flag(SUPPRESS_2FA_MODAL_FLAG),
            use_attestation_endpoints: self.config.attestation.use_attestation_endpoints,
        })
    }

    fn link_attestation_check(
        &self,
        _configuration: &LinkConfiguration,
    ) -> Arc<dyn AttestationCheck> {
        self.attestation.clone()
    }

    fn account_status(&self, _configuration: &LinkConfiguration) -> Result<AccountStatus> {
        self.account_status
            .ok_or_else(|| LinkGateError::collaborator("account status unavailable"))
    }
}
