use serde::{Deserialize, Serialize};

use crate::common::{Card, Extra};

/// Body of `POST /v1/payment-tokens`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentTokenRequest {
    pub card: Card,
}

/// Payment token as returned on creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTokenResponse {
    pub payment_token_id: String,
    /// `AVAILABLE`, `USED` or `EXPIRED`
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub issuer: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
