//! Wire types for the PayMaya Payments API.
//!
//! Every record in this crate mirrors a JSON document exchanged with the
//! remote API. Field names on the wire are camelCase and must match the
//! remote schema exactly, so each struct uses `rename_all = "camelCase"`.
//!
//! Request records and response records are kept apart: a request only
//! carries what the caller is allowed to send, and a response keeps every
//! field it does not recognise in a flattened `extra` map.

use serde::{Deserialize, Serialize};

pub mod common;
pub mod customers;
pub mod lenient;
pub mod payments;
pub mod subscriptions;
pub mod tokens;
pub mod webhooks;

pub use common::{Address, Amount, Buyer, Card, Contact, Extra, Metadata, RedirectUrl};
pub use customers::{
    CustomerDetails, CustomerResponse, DefaultCardRequest, VaultCardRequest, VaultedCardResponse,
};
pub use payments::{
    CardPaymentRequest, ConvenienceFeeRequest, ConvenienceFeeResponse, CreatePaymentRequest,
    PaymentResponse, RefundRequest, RefundResponse, VoidRequest, VoidResponse,
};
pub use subscriptions::{CreateSubscriptionRequest, SubscriptionInterval, SubscriptionResponse};
pub use tokens::{CreatePaymentTokenRequest, PaymentTokenResponse};
pub use webhooks::{WebhookEvent, WebhookRequest, WebhookResponse};

/// Base URL of the live PayMaya Payments API.
pub const PAYMENTS_PRODUCTION_URL: &str = "https://pg.paymaya.com/payments";

/// Base URL of the PayMaya Payments sandbox.
pub const PAYMENTS_SANDBOX_URL: &str = "https://pg-sandbox.paymaya.com/payments";

/// Flag value that selects the production environment. Compared exactly.
pub const PRODUCTION_FLAG: &str = "PRODUCTION";

/// Target environment of the remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

impl Environment {
    /// Map a configuration flag to an environment.
    ///
    /// Only the exact string `"PRODUCTION"` selects production; any other
    /// value, including an empty string or a differently cased one, falls
    /// back to the sandbox so that a misconfiguration never charges real
    /// cards.
    pub fn from_flag(flag: &str) -> Self {
        if flag == PRODUCTION_FLAG {
            Environment::Production
        } else {
            Environment::Sandbox
        }
    }

    /// Same as [`Environment::from_flag`], treating an unset flag as sandbox.
    pub fn from_optional_flag(flag: Option<&str>) -> Self {
        flag.map(Self::from_flag).unwrap_or_default()
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PAYMENTS_PRODUCTION_URL,
            Environment::Sandbox => PAYMENTS_SANDBOX_URL,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Error document returned by the remote API instead of a resource.
///
/// The API is not consistent about the type of `code` (usually a string such
/// as `"PY0009"`, occasionally a number), so it is kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-field validation details, when the API provides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl ApiErrorPayload {
    /// Render `code` as text; strings are returned without quotes.
    pub fn code_text(&self) -> Option<String> {
        self.code.as_ref().map(|code| match code {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
