use serde::{Deserialize, Serialize};

use crate::common::Extra;

/// Checkout lifecycle event a webhook listens to.
///
/// The API may grow new event names; those are kept verbatim in
/// [`WebhookEvent::Other`] rather than failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WebhookEvent {
    CheckoutSuccess,
    CheckoutFailure,
    CheckoutDropout,
    Other(String),
}

impl WebhookEvent {
    pub const CHECKOUT_SUCCESS: &'static str = "CHECKOUT_SUCCESS";
    pub const CHECKOUT_FAILURE: &'static str = "CHECKOUT_FAILURE";
    pub const CHECKOUT_DROPOUT: &'static str = "CHECKOUT_DROPOUT";

    pub fn as_str(&self) -> &str {
        match self {
            WebhookEvent::CheckoutSuccess => Self::CHECKOUT_SUCCESS,
            WebhookEvent::CheckoutFailure => Self::CHECKOUT_FAILURE,
            WebhookEvent::CheckoutDropout => Self::CHECKOUT_DROPOUT,
            WebhookEvent::Other(name) => name,
        }
    }
}

impl From<String> for WebhookEvent {
    fn from(name: String) -> Self {
        match name.as_str() {
            Self::CHECKOUT_SUCCESS => WebhookEvent::CheckoutSuccess,
            Self::CHECKOUT_FAILURE => WebhookEvent::CheckoutFailure,
            Self::CHECKOUT_DROPOUT => WebhookEvent::CheckoutDropout,
            _ => WebhookEvent::Other(name),
        }
    }
}

impl From<&str> for WebhookEvent {
    fn from(name: &str) -> Self {
        WebhookEvent::from(name.to_string())
    }
}

impl From<WebhookEvent> for String {
    fn from(event: WebhookEvent) -> Self {
        match event {
            WebhookEvent::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /v1/webhooks` and `PUT /v1/webhooks/{webhookId}`.
///
/// The id lives in the path, never in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<WebhookEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub id: String,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub name: Option<WebhookEvent>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub callback_url: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
