//! Value types referenced by checkout analytics events.

use serde::{Deserialize, Serialize};

/// Which payment sheet integration produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventMode {
    Complete,
    Custom,
    Embedded,
}

impl EventMode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Custom => "custom",
            Self::Embedded => "embedded",
        }
    }
}

/// Card brands reported in co-branded card events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    MasterCard,
    AmericanExpress,
    Discover,
    Jcb,
    DinersClub,
    UnionPay,
    CartesBancaires,
    Unknown,
}

impl CardBrand {
    /// Brand code used in analytics params.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::MasterCard => "mastercard",
            Self::AmericanExpress => "amex",
            Self::Discover => "discover",
            Self::Jcb => "jcb",
            Self::DinersClub => "diners",
            Self::UnionPay => "unionpay",
            Self::CartesBancaires => "cartes_bancaires",
            Self::Unknown => "unknown",
        }
    }
}

/// How Link is integrated for the loaded intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    Passthrough,
    LinkPaymentMethod,
    LinkCardBrand,
}

impl LinkMode {
    pub fn analytics_value(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::LinkPaymentMethod => "payment_method_mode",
            Self::LinkCardBrand => "link_card_brand",
        }
    }
}

/// Deferred intent flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferredMode {
    Payment,
    Setup,
}

/// How the payment sheet was initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InitializationMode {
    PaymentIntent,
    SetupIntent,
    DeferredIntent { mode: DeferredMode },
}

impl InitializationMode {
    /// Value of the `intent_type` param.
    pub fn intent_type(&self) -> &'static str {
        match self {
            Self::PaymentIntent => "payment_intent",
            Self::SetupIntent => "setup_intent",
            Self::DeferredIntent {
                mode: DeferredMode::Payment,
            } => "deferred_payment_intent",
            Self::DeferredIntent {
                mode: DeferredMode::Setup,
            } => "deferred_setup_intent",
        }
    }
}

/// Where a deferred intent was confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferredIntentConfirmationType {
    Client,
    Server,
    None,
}

impl DeferredIntentConfirmationType {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
            Self::None => "none",
        }
    }
}

/// The payment option the customer picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentSelection {
    GooglePay,
    Link,
    /// A payment method saved to the customer.
    Saved { payment_method_type: String },
    /// A payment method entered in the sheet.
    New {
        payment_method_type: String,
        /// Entered in the inline Link signup form.
        #[serde(default)]
        link_inline: bool,
        /// Card extra param, when the customer was asked.
        #[serde(default)]
        set_as_default: Option<bool>,
    },
    ExternalPaymentMethod { payment_method_type: String },
}

impl PaymentSelection {
    /// Selection segment of payment and select event names.
    pub fn analytics_value(&self) -> &'static str {
        match self {
            Self::GooglePay => "googlepay",
            Self::Link => "link",
            Self::Saved { .. } => "savedpm",
            Self::New {
                link_inline: true, ..
            } => "link",
            Self::New { .. } | Self::ExternalPaymentMethod { .. } => "newpm",
        }
    }

    /// Value of the `selected_lpm` param.
    pub fn selected_lpm(&self) -> &str {
        match self {
            Self::GooglePay => "google_pay",
            Self::Link => "link",
            Self::Saved {
                payment_method_type,
            }
            | Self::New {
                payment_method_type,
                ..
            }
            | Self::ExternalPaymentMethod {
                payment_method_type,
            } => payment_method_type.as_str(),
        }
    }

    /// Value of the `link_context` param, if any.
    pub fn link_context(&self) -> Option<&'static str> {
        match self {
            Self::Link => Some("wallet"),
            _ => None,
        }
    }

    /// Set-as-default choice carried by a new card.
    pub fn set_as_default(&self) -> Option<bool> {
        match self {
            Self::New { set_as_default, .. } => *set_as_default,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> PaymentSelection {
        PaymentSelection::New {
            payment_method_type: "card".to_string(),
            link_inline: false,
            set_as_default: None,
        }
    }

    #[test]
    fn test_selection_analytics_values() {
        assert_eq!(PaymentSelection::GooglePay.analytics_value(), "googlepay");
        assert_eq!(PaymentSelection::Link.analytics_value(), "link");
        assert_eq!(card().analytics_value(), "newpm");
        assert_eq!(
            PaymentSelection::Saved {
                payment_method_type: "sepa_debit".to_string()
            }
            .analytics_value(),
            "savedpm"
        );
        assert_eq!(
            PaymentSelection::ExternalPaymentMethod {
                payment_method_type: "external_fawry".to_string()
            }
            .analytics_value(),
            "newpm"
        );
    }

    #[test]
    fn test_inline_link_card_reports_as_link_but_selects_card() {
        let inline = PaymentSelection::New {
            payment_method_type: "card".to_string(),
            link_inline: true,
            set_as_default: None,
        };
        assert_eq!(inline.analytics_value(), "link");
        assert_eq!(inline.selected_lpm(), "card");
        assert_eq!(inline.link_context(), None);
    }

    #[test]
    fn test_selected_lpm() {
        assert_eq!(PaymentSelection::GooglePay.selected_lpm(), "google_pay");
        assert_eq!(PaymentSelection::Link.selected_lpm(), "link");
        assert_eq!(card().selected_lpm(), "card");
    }

    #[test]
    fn test_intent_types() {
        assert_eq!(InitializationMode::PaymentIntent.intent_type(), "payment_intent");
        assert_eq!(InitializationMode::SetupIntent.intent_type(), "setup_intent");
        assert_eq!(
            InitializationMode::DeferredIntent {
                mode: DeferredMode::Payment
            }
            .intent_type(),
            "deferred_payment_intent"
        );
        assert_eq!(
            InitializationMode::DeferredIntent {
                mode: DeferredMode::Setup
            }
            .intent_type(),
            "deferred_setup_intent"
        );
    }

    #[test]
    fn test_selection_deserialization_defaults() {
        let selection: PaymentSelection =
            serde_json::from_str(r#"{"type":"new","payment_method_type":"card"}"#).unwrap();
        assert_eq!(selection, card());
    }

    #[test]
    fn test_card_brand_codes() {
        assert_eq!(CardBrand::Visa.code(), "visa");
        assert_eq!(CardBrand::CartesBancaires.code(), "cartes_bancaires");
    }
}
