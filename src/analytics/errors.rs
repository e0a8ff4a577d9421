//! Errors as they appear in analytics params.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Class of a payments API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    #[default]
    Api,
    Connection,
    Authentication,
    InvalidRequest,
    RateLimit,
    Card,
}

impl ApiErrorKind {
    pub fn analytics_value(&self) -> &'static str {
        match self {
            Self::Api => "apiError",
            Self::Connection => "connectionError",
            Self::Authentication => "authError",
            Self::InvalidRequest => "invalidRequestError",
            Self::RateLimit => "rateLimitError",
            Self::Card => "cardError",
        }
    }
}

/// A payments API failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: Option<String>,
    pub request_id: Option<String>,
    pub error_type: Option<String>,
    pub error_code: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn analytics_value(&self) -> &'static str {
        self.kind.analytics_value()
    }

    /// `analytics_value`, `request_id`, `error_type` and `error_code`, each
    /// only when known.
    pub fn error_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("analytics_value".into(), self.analytics_value().into());
        if let Some(request_id) = &self.request_id {
            params.insert("request_id".into(), request_id.clone().into());
        }
        if let Some(error_type) = &self.error_type {
            params.insert("error_type".into(), error_type.clone().into());
        }
        if let Some(error_code) = &self.error_code {
            params.insert("error_code".into(), error_code.clone().into());
        }
        params
    }
}

/// Why a payment confirmation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfirmationError {
    /// The payments API rejected the confirmation.
    Stripe { error: ApiError },
    /// The merchant's external payment method handler reported failure.
    ExternalPaymentMethod,
}

impl ConfirmationError {
    pub fn analytics_value(&self) -> &'static str {
        match self {
            Self::Stripe { error } => error.analytics_value(),
            Self::ExternalPaymentMethod => "externalPaymentMethodError",
        }
    }
}
