//! Payments, voids, refunds and convenience fees.

use serde::{Deserialize, Serialize};

use crate::common::{Amount, Buyer, Extra, Metadata, RedirectUrl};

/// Body of `POST /v1/payments`: charge a payment token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub payment_token_id: String,
    pub total_amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<RedirectUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of `POST /v1/customers/{customerId}/cards/{cardToken}`: charge a
/// vaulted card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentRequest {
    pub total_amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<RedirectUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Payment resource
///
/// Returned by payment creation, retrieval, status lookup by reference
/// number, card payments and subscription payment listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub is_paid: Option<bool>,
    /// e.g. `PAYMENT_SUCCESS`, `PAYMENT_FAILED`, `FOR_AUTHENTICATION`
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub can_void: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub can_refund: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub receipt_number: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub request_reference_number: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub payment_token_id: Option<String>,
    /// 3-D Secure page the buyer must visit, when verification is required
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub verification_url: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `DELETE /v1/checkouts/{paymentId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidRequest {
    pub reason: String,
}

impl VoidRequest {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A void attempt on a payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidResponse {
    pub id: String,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub payment: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /v1/payments/{paymentId}/refunds`. A partial refund sends
/// less than the captured amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub total_amount: Amount,
    pub reason: String,
}

impl RefundRequest {
    pub fn new(total_amount: Amount, reason: impl Into<String>) -> Self {
        Self {
            total_amount,
            reason: reason.into(),
        }
    }
}

/// A refund attempt on a payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub id: String,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub payment: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub total_amount: Option<Amount>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /v1/fees`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvenienceFeeRequest {
    pub total_amount: Amount,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ConvenienceFeeRequest {
    pub fn new(total_amount: Amount) -> Self {
        Self {
            total_amount,
            extra: Extra::new(),
        }
    }
}

/// Convenience fee computed from the merchant discount rate.
///
/// The remote document has no stable shape beyond the amounts, so everything
/// else stays in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvenienceFeeResponse {
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub total_amount: Option<Amount>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub convenience_fee: Option<Amount>,
    #[serde(flatten)]
    pub extra: Extra,
}
