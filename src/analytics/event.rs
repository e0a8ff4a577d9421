//! Checkout analytics events.
//!
//! Each event renders to the name and flat parameter map the analytics
//! backend ingests. Nothing here sends anything; reporting is the caller's
//! business.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analytics::errors::{ApiError, ConfirmationError};
use crate::analytics::selection::{
    CardBrand, DeferredIntentConfirmationType, EventMode, InitializationMode, LinkMode,
    PaymentSelection,
};

/// Durations travel as fractional seconds.
mod duration_secs {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

mod opt_duration_secs {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match duration {
            Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}

/// Outcome of a payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentResult {
    Success,
    Failure { error: ConfirmationError },
}

/// Where the card brand dropdown was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CbcEventSource {
    Add,
    Edit,
}

impl CbcEventSource {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
        }
    }
}

/// A payment sheet analytics event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PaymentSheetEvent {
    LoadSucceeded {
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_mode: Option<LinkMode>,
        #[serde(default)]
        google_pay_supported: bool,
        #[serde(with = "duration_secs")]
        duration: Duration,
        #[serde(default)]
        payment_selection: Option<PaymentSelection>,
        initialization_mode: InitializationMode,
        #[serde(default)]
        ordered_lpms: Vec<String>,
        #[serde(default)]
        require_cvc_recollection: bool,
        #[serde(default)]
        has_default_payment_method: Option<bool>,
        #[serde(default)]
        set_as_default_enabled: Option<bool>,
    },
    Payment {
        mode: EventMode,
        payment_selection: PaymentSelection,
        #[serde(default, with = "opt_duration_secs")]
        duration: Option<Duration>,
        result: PaymentResult,
        #[serde(default)]
        currency: Option<String>,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
        #[serde(default)]
        deferred_intent_confirmation_type: Option<DeferredIntentConfirmationType>,
    },
    SelectPaymentOption {
        mode: EventMode,
        payment_selection: PaymentSelection,
        #[serde(default)]
        currency: Option<String>,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    ShowPaymentOptionForm {
        code: String,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    PaymentOptionFormInteraction {
        code: String,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    CardNumberCompleted {
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    ShowEditablePaymentOption {
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    HideEditablePaymentOption {
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    ShowPaymentOptionBrands {
        selected_brand: CardBrand,
        source: CbcEventSource,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    HidePaymentOptionBrands {
        selected_brand: Option<CardBrand>,
        source: CbcEventSource,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    UpdatePaymentOptionSucceeded {
        selected_brand: CardBrand,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    UpdatePaymentOptionFailed {
        selected_brand: CardBrand,
        error: ApiError,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    SetAsDefaultPaymentMethodSucceeded {
        payment_method_type: Option<String>,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    SetAsDefaultPaymentMethodFailed {
        payment_method_type: Option<String>,
        error: ApiError,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    PressConfirmButton {
        #[serde(default)]
        selected_lpm: Option<String>,
        #[serde(default)]
        currency: Option<String>,
        #[serde(default, with = "opt_duration_secs")]
        duration: Option<Duration>,
        #[serde(default)]
        link_context: Option<String>,
        #[serde(default)]
        is_deferred: bool,
        #[serde(default)]
        link_enabled: bool,
        #[serde(default)]
        google_pay_supported: bool,
    },
    #[serde(rename = "cannot_return_from_link_and_lpms")]
    CannotProperlyReturnFromLinkAndLpms { mode: EventMode },
}

/// Rendered event, ready for a transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub event_name: String,
    pub params: Map<String, Value>,
}

fn base_params(is_deferred: bool, link_enabled: bool, google_pay_supported: bool) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("is_decoupled".into(), is_deferred.into());
    params.insert("link_enabled".into(), link_enabled.into());
    params.insert("google_pay_enabled".into(), google_pay_supported.into());
    params
}

fn insert_opt<V: Into<Value>>(params: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.into());
    }
}

impl PaymentSheetEvent {
    /// Event name as ingested by the backend.
    pub fn event_name(&self) -> String {
        match self {
            Self::LoadSucceeded { .. } => "mc_load_succeeded".to_string(),
            Self::Payment {
                mode,
                payment_selection,
                result,
                ..
            } => {
                let outcome = match result {
                    PaymentResult::Success => "success",
                    PaymentResult::Failure { .. } => "failure",
                };
                format!(
                    "mc_{}_payment_{}_{}",
                    mode.code(),
                    payment_selection.analytics_value(),
                    outcome
                )
            }
            Self::SelectPaymentOption {
                mode,
                payment_selection,
                ..
            } => format!(
                "mc_{}_paymentoption_{}_select",
                mode.code(),
                payment_selection.analytics_value()
            ),
            Self::ShowPaymentOptionForm { .. } => "mc_form_shown".to_string(),
            Self::PaymentOptionFormInteraction { .. } => "mc_form_interacted".to_string(),
            Self::CardNumberCompleted { .. } => "mc_card_number_completed".to_string(),
            Self::ShowEditablePaymentOption { .. } => "mc_open_edit_screen".to_string(),
            Self::HideEditablePaymentOption { .. } => "mc_cancel_edit_screen".to_string(),
            Self::ShowPaymentOptionBrands { .. } => "mc_open_cbc_dropdown".to_string(),
            Self::HidePaymentOptionBrands { .. } => "mc_close_cbc_dropdown".to_string(),
            Self::UpdatePaymentOptionSucceeded { .. } => "mc_update_card".to_string(),
            Self::UpdatePaymentOptionFailed { .. } => "mc_update_card_failed".to_string(),
            Self::SetAsDefaultPaymentMethodSucceeded { .. } => {
                "mc_set_default_payment_method".to_string()
            }
            Self::SetAsDefaultPaymentMethodFailed { .. } => {
                "mc_set_default_payment_method_failed".to_string()
            }
            Self::PressConfirmButton { .. } => "mc_confirm_button_tapped".to_string(),
            Self::CannotProperlyReturnFromLinkAndLpms { mode } => {
                format!("mc_{}_cannot_return_from_link_and_lpms", mode.code())
            }
        }
    }

    /// Flat parameter map for the event.
    pub fn params(&self) -> Map<String, Value> {
        match self {
            Self::LoadSucceeded {
                is_deferred,
                link_mode,
                google_pay_supported,
                duration,
                payment_selection,
                initialization_mode,
                ordered_lpms,
                require_cvc_recollection,
                has_default_payment_method,
                set_as_default_enabled,
            } => {
                let mut params =
                    base_params(*is_deferred, link_mode.is_some(), *google_pay_supported);
                params.insert("duration".into(), duration.as_secs_f64().into());
                params.insert(
                    "selected_lpm".into(),
                    payment_selection
                        .as_ref()
                        .map_or("none", PaymentSelection::selected_lpm)
                        .into(),
                );
                params.insert(
                    "intent_type".into(),
                    initialization_mode.intent_type().into(),
                );
                params.insert("ordered_lpms".into(), ordered_lpms.join(",").into());
                params.insert(
                    "require_cvc_recollection".into(),
                    (*require_cvc_recollection).into(),
                );
                insert_opt(
                    &mut params,
                    "link_mode",
                    link_mode.map(|mode| mode.analytics_value()),
                );
                insert_opt(&mut params, "set_as_default_enabled", *set_as_default_enabled);
                // Only meaningful when the merchant enabled set-as-default.
                if *set_as_default_enabled == Some(true) {
                    insert_opt(
                        &mut params,
                        "has_default_payment_method",
                        *has_default_payment_method,
                    );
                }
                params
            }
            Self::Payment {
                payment_selection,
                duration,
                result,
                currency,
                is_deferred,
                link_enabled,
                google_pay_supported,
                deferred_intent_confirmation_type,
                ..
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                insert_opt(&mut params, "currency", currency.clone());
                insert_opt(&mut params, "duration", duration.map(|d| d.as_secs_f64()));
                params.insert(
                    "selected_lpm".into(),
                    payment_selection.selected_lpm().into(),
                );
                insert_opt(&mut params, "link_context", payment_selection.link_context());
                insert_opt(
                    &mut params,
                    "set_as_default",
                    payment_selection.set_as_default(),
                );
                insert_opt(
                    &mut params,
                    "deferred_intent_confirmation_type",
                    deferred_intent_confirmation_type.map(|t| t.value()),
                );
                if let PaymentResult::Failure { error } = result {
                    params.insert("error_message".into(), error.analytics_value().into());
                }
                params
            }
            Self::SelectPaymentOption {
                currency,
                is_deferred,
                link_enabled,
                google_pay_supported,
                ..
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                insert_opt(&mut params, "currency", currency.clone());
                params
            }
            Self::ShowPaymentOptionForm {
                code,
                is_deferred,
                link_enabled,
                google_pay_supported,
            }
            | Self::PaymentOptionFormInteraction {
                code,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                params.insert("selected_lpm".into(), code.clone().into());
                params
            }
            Self::CardNumberCompleted {
                is_deferred,
                link_enabled,
                google_pay_supported,
            }
            | Self::ShowEditablePaymentOption {
                is_deferred,
                link_enabled,
                google_pay_supported,
            }
            | Self::HideEditablePaymentOption {
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => base_params(*is_deferred, *link_enabled, *google_pay_supported),
            Self::ShowPaymentOptionBrands {
                selected_brand,
                source,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                params.insert("cbc_event_source".into(), source.value().into());
                params.insert("selected_card_brand".into(), selected_brand.code().into());
                params
            }
            Self::HidePaymentOptionBrands {
                selected_brand,
                source,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                params.insert("cbc_event_source".into(), source.value().into());
                insert_opt(
                    &mut params,
                    "selected_card_brand",
                    selected_brand.map(|brand| brand.code()),
                );
                params
            }
            Self::UpdatePaymentOptionSucceeded {
                selected_brand,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                params.insert("selected_card_brand".into(), selected_brand.code().into());
                params
            }
            Self::UpdatePaymentOptionFailed {
                selected_brand,
                error,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                params.insert("selected_card_brand".into(), selected_brand.code().into());
                insert_opt(&mut params, "error_message", error.message.clone());
                params.extend(error.error_params());
                params
            }
            Self::SetAsDefaultPaymentMethodSucceeded {
                payment_method_type,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                insert_opt(
                    &mut params,
                    "payment_method_type",
                    payment_method_type.clone(),
                );
                params
            }
            Self::SetAsDefaultPaymentMethodFailed {
                payment_method_type,
                error,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                insert_opt(
                    &mut params,
                    "payment_method_type",
                    payment_method_type.clone(),
                );
                insert_opt(&mut params, "error_message", error.message.clone());
                params.extend(error.error_params());
                params
            }
            Self::PressConfirmButton {
                selected_lpm,
                currency,
                duration,
                link_context,
                is_deferred,
                link_enabled,
                google_pay_supported,
            } => {
                let mut params = base_params(*is_deferred, *link_enabled, *google_pay_supported);
                insert_opt(&mut params, "selected_lpm", selected_lpm.clone());
                insert_opt(&mut params, "currency", currency.clone());
                insert_opt(&mut params, "duration", duration.map(|d| d.as_secs_f64()));
                insert_opt(&mut params, "link_context", link_context.clone());
                params
            }
            Self::CannotProperlyReturnFromLinkAndLpms { .. } => base_params(false, false, false),
        }
    }

    /// Render name and params together.
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            event_name: self.event_name(),
            params: self.params(),
        }
    }
}
