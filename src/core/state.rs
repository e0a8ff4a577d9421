//! Link session state types.
//!
//! These types describe what the host application knows about the user's
//! Link account at the moment a checkout is prepared: the remembered login
//! state, the attestation outcome, and the configuration handed down by the
//! server. They are produced by collaborators and only read by the gate.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Server flag that suppresses the alternate (2FA) verification modal.
pub const SUPPRESS_2FA_MODAL_FLAG: &str = "link_mobile_suppress_2fa_modal";

/// Remembered authentication state of the user's Link account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
    /// No account to act on.
    LoggedOut,
    /// Account is signed in and verified.
    LoggedIn,
    /// Account is known but still needs a verification step.
    NeedsVerification,
}

impl LoginState {
    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoggedOut => "logged_out",
            Self::LoggedIn => "logged_in",
            Self::NeedsVerification => "needs_verification",
        }
    }
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status as reported by the account-status source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Verified,
    NeedsVerification,
    VerificationStarted,
    SignedOut,
    /// The lookup itself failed.
    Error,
}

impl From<AccountStatus> for LoginState {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Verified => LoginState::LoggedIn,
            AccountStatus::NeedsVerification | AccountStatus::VerificationStarted => {
                LoginState::NeedsVerification
            }
            AccountStatus::SignedOut | AccountStatus::Error => LoginState::LoggedOut,
        }
    }
}

/// Opaque diagnostic payload attached to a failed attestation.
///
/// Carried for logs and telemetry only; nothing branches on its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureCause(String);

impl FailureCause {
    /// Create a cause from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The diagnostic message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<E: std::error::Error> From<&E> for FailureCause {
    fn from(err: &E) -> Self {
        Self(err.to_string())
    }
}

/// Outcome of a device/account attestation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "cause", rename_all = "snake_case")]
pub enum AttestationResult {
    Successful,
    /// The device or app failed integrity verification.
    AttestationFailed(FailureCause),
    /// The check could not be completed (network, timeout, backend).
    Error(FailureCause),
    /// The account lookup behind the check failed.
    AccountError(FailureCause),
}

impl AttestationResult {
    /// Whether the check passed.
    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Successful)
    }

    /// The failure cause, if the check did not pass.
    pub fn cause(&self) -> Option<&FailureCause> {
        match self {
            Self::Successful => None,
            Self::AttestationFailed(cause) | Self::Error(cause) | Self::AccountError(cause) => {
                Some(cause)
            }
        }
    }

    /// Stable snake_case variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Successful => "successful",
            Self::AttestationFailed(_) => "attestation_failed",
            Self::Error(_) => "error",
            Self::AccountError(_) => "account_error",
        }
    }
}

/// How Link signup is offered next to "save for future use".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSignupMode {
    #[default]
    InsteadOfSaveForFutureUse,
    AlongsideSaveForFutureUse,
}

impl LinkSignupMode {
    /// Parse the snake_case name used in config files and env vars.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "instead_of_save_for_future_use" => Some(Self::InsteadOfSaveForFutureUse),
            "alongside_save_for_future_use" => Some(Self::AlongsideSaveForFutureUse),
            _ => None,
        }
    }

    /// Snake_case name, as accepted by `parse`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsteadOfSaveForFutureUse => "instead_of_save_for_future_use",
            Self::AlongsideSaveForFutureUse => "alongside_save_for_future_use",
        }
    }
}

/// Link configuration for one checkout, as handed down by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfiguration {
    /// Merchant display name.
    pub merchant_name: String,
    /// Customer email used for account lookup, if known.
    pub customer_email: Option<String>,
    /// Funding sources Link may use for this intent.
    pub link_funding_sources: Vec<String>,
    /// Boolean feature flags.
    pub flags: HashMap<String, bool>,
}

impl LinkConfiguration {
    /// Create a configuration for a merchant.
    pub fn new(merchant_name: impl Into<String>) -> Self {
        Self {
            merchant_name: merchant_name.into(),
            ..Default::default()
        }
    }

    /// Set a feature flag.
    pub fn with_flag(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.flags.insert(name.into(), enabled);
        self
    }

    /// Read a feature flag; absent flags are off.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

/// Resolved Link state for one checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkState {
    pub login_state: LoginState,
    pub signup_mode: LinkSignupMode,
    pub configuration: LinkConfiguration,
}

impl LinkState {
    /// Create a new link state.
    pub fn new(
        login_state: LoginState,
        signup_mode: LinkSignupMode,
        configuration: LinkConfiguration,
    ) -> Self {
        Self {
            login_state,
            signup_mode,
            configuration,
        }
    }

    /// Build the state from an account status observation.
    pub fn from_account_status(
        status: AccountStatus,
        signup_mode: LinkSignupMode,
        configuration: LinkConfiguration,
    ) -> Self {
        Self::new(status.into(), signup_mode, configuration)
    }
}
