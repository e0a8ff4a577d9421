//! Eager-launch eligibility gate for Link.
//!
//! Decides whether the Link flow should start on its own as soon as the
//! checkout opens, or be offered as one option among several. The decision is
//! a pure function of three inputs and is evaluated in a fixed order:
//!
//! 1. no resolved Link state → present as an option
//! 2. 2FA modal suppressed → present as an option
//! 3. attestation did not succeed → present as an option
//! 4. otherwise the login state decides

use serde::{Deserialize, Serialize};

use crate::core::state::{AttestationResult, LoginState};

/// Which rule produced a gate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityReason {
    /// No Link state was resolved yet.
    NoLinkState,
    /// Policy suppression switch is on.
    Suppressed,
    /// Attestation returned any non-successful result.
    AttestationFailed,
    /// No account to act on.
    LoggedOut,
    LoggedIn,
    /// Verification happens inside the launched flow.
    NeedsVerification,
}

impl EligibilityReason {
    /// Human-readable explanation for CLI output.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NoLinkState => "no Link state resolved",
            Self::Suppressed => "2FA modal suppressed by policy",
            Self::AttestationFailed => "attestation check did not succeed",
            Self::LoggedOut => "user is logged out",
            Self::LoggedIn => "user is logged in",
            Self::NeedsVerification => "user needs verification in the launched flow",
        }
    }
}

/// Decision plus the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOutcome {
    /// Whether to launch Link automatically.
    pub launch_eagerly: bool,
    pub reason: EligibilityReason,
}

impl GateOutcome {
    fn launch(reason: EligibilityReason) -> Self {
        Self {
            launch_eagerly: true,
            reason,
        }
    }

    fn present(reason: EligibilityReason) -> Self {
        Self {
            launch_eagerly: false,
            reason,
        }
    }
}

/// Evaluate the gate and report which rule decided.
///
/// The three attestation failure variants are equivalent here; their
/// distinction is left to whoever logs the result.
pub fn evaluate(
    state: Option<LoginState>,
    attestation_result: &AttestationResult,
    suppressed: bool,
) -> GateOutcome {
    let Some(login_state) = state else {
        return GateOutcome::present(EligibilityReason::NoLinkState);
    };

    if suppressed {
        return GateOutcome::present(EligibilityReason::Suppressed);
    }

    if !attestation_result.is_successful() {
        return GateOutcome::present(EligibilityReason::AttestationFailed);
    }

    match login_state {
        LoginState::LoggedIn => GateOutcome::launch(EligibilityReason::LoggedIn),
        LoginState::NeedsVerification => {
            GateOutcome::launch(EligibilityReason::NeedsVerification)
        }
        LoginState::LoggedOut => GateOutcome::present(EligibilityReason::LoggedOut),
    }
}

/// Whether to launch Link without an explicit tap.
pub fn should_launch_eagerly(
    state: Option<LoginState>,
    attestation_result: &AttestationResult,
    suppressed: bool,
) -> bool {
    evaluate(state, attestation_result, suppressed).launch_eagerly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::FailureCause;
    use proptest::prelude::*;

    fn failures() -> Vec<AttestationResult> {
        vec![
            AttestationResult::AttestationFailed(FailureCause::new("integrity")),
            AttestationResult::Error(FailureCause::new("timeout")),
            AttestationResult::AccountError(FailureCause::new("lookup")),
        ]
    }

    fn login_state_strategy() -> impl Strategy<Value = Option<LoginState>> {
        prop_oneof![
            Just(None),
            Just(Some(LoginState::LoggedOut)),
            Just(Some(LoginState::LoggedIn)),
            Just(Some(LoginState::NeedsVerification)),
        ]
    }

    fn attestation_strategy() -> impl Strategy<Value = AttestationResult> {
        prop_oneof![
            Just(AttestationResult::Successful),
            ".*".prop_map(|m| AttestationResult::AttestationFailed(FailureCause::new(m))),
            ".*".prop_map(|m| AttestationResult::Error(FailureCause::new(m))),
            ".*".prop_map(|m| AttestationResult::AccountError(FailureCause::new(m))),
        ]
    }

    // =========================================================================
    // Decision table
    // =========================================================================

    #[test]
    fn test_logged_in_launches() {
        assert!(should_launch_eagerly(
            Some(LoginState::LoggedIn),
            &AttestationResult::Successful,
            false
        ));
    }

    #[test]
    fn test_needs_verification_launches() {
        assert!(should_launch_eagerly(
            Some(LoginState::NeedsVerification),
            &AttestationResult::Successful,
            false
        ));
    }

    #[test]
    fn test_logged_out_does_not_launch() {
        let outcome = evaluate(
            Some(LoginState::LoggedOut),
            &AttestationResult::Successful,
            false,
        );
        assert!(!outcome.launch_eagerly);
        assert_eq!(outcome.reason, EligibilityReason::LoggedOut);
    }

    #[test]
    fn test_suppressed_does_not_launch_logged_in_user() {
        let outcome = evaluate(
            Some(LoginState::LoggedIn),
            &AttestationResult::Successful,
            true,
        );
        assert!(!outcome.launch_eagerly);
        assert_eq!(outcome.reason, EligibilityReason::Suppressed);
    }

    #[test]
    fn test_each_attestation_failure_blocks_logged_in_user() {
        for failure in failures() {
            let outcome = evaluate(Some(LoginState::LoggedIn), &failure, false);
            assert!(!outcome.launch_eagerly, "{:?} should not launch", failure);
            assert_eq!(outcome.reason, EligibilityReason::AttestationFailed);
        }
    }

    #[test]
    fn test_missing_state_wins_over_everything() {
        let outcome = evaluate(None, &AttestationResult::Successful, false);
        assert_eq!(outcome.reason, EligibilityReason::NoLinkState);

        let outcome = evaluate(None, &AttestationResult::Error(FailureCause::default()), true);
        assert_eq!(outcome.reason, EligibilityReason::NoLinkState);
    }

    #[test]
    fn test_suppression_checked_before_attestation() {
        let outcome = evaluate(
            Some(LoginState::LoggedIn),
            &AttestationResult::AccountError(FailureCause::new("lookup")),
            true,
        );
        assert_eq!(outcome.reason, EligibilityReason::Suppressed);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = evaluate(
            Some(LoginState::NeedsVerification),
            &AttestationResult::Successful,
            false,
        );
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "launch_eagerly": true, "reason": "needs_verification" })
        );
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        #[test]
        fn prop_absent_state_never_launches(
            attestation in attestation_strategy(),
            suppressed in any::<bool>(),
        ) {
            prop_assert!(!should_launch_eagerly(None, &attestation, suppressed));
        }

        #[test]
        fn prop_suppression_never_launches(
            state in login_state_strategy(),
            attestation in attestation_strategy(),
        ) {
            prop_assert!(!should_launch_eagerly(state, &attestation, true));
        }

        #[test]
        fn prop_failed_attestation_never_launches(
            state in login_state_strategy(),
            attestation in attestation_strategy(),
            suppressed in any::<bool>(),
        ) {
            prop_assume!(!attestation.is_successful());
            prop_assert!(!should_launch_eagerly(state, &attestation, suppressed));
        }

        #[test]
        fn prop_launch_implies_all_gates_passed(
            state in login_state_strategy(),
            attestation in attestation_strategy(),
            suppressed in any::<bool>(),
        ) {
            if should_launch_eagerly(state, &attestation, suppressed) {
                prop_assert!(!suppressed);
                prop_assert!(attestation.is_successful());
                prop_assert!(matches!(
                    state,
                    Some(LoginState::LoggedIn) | Some(LoginState::NeedsVerification)
                ));
            }
        }

        #[test]
        fn prop_evaluation_is_idempotent(
            state in login_state_strategy(),
            attestation in attestation_strategy(),
            suppressed in any::<bool>(),
        ) {
            let first = evaluate(state, &attestation, suppressed);
            let second = evaluate(state, &attestation, suppressed);
            prop_assert_eq!(first, second);
        }
    }
}
