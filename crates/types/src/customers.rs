//! Card vault: customers and their stored cards.

use serde::{Deserialize, Serialize};

use crate::common::{Address, Contact, Extra, Metadata, RedirectUrl};

/// Customer attributes a caller may send on register or update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub first_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub middle_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub last_name: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub birthday: Option<String>,
    /// `M` or `F`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub sex: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub contact: Option<Contact>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub billing_address: Option<Address>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub shipping_address: Option<Address>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::option"
    )]
    pub metadata: Option<Metadata>,
}

/// Customer as stored in the card vault
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    #[serde(flatten)]
    pub details: CustomerDetails,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /v1/customers/{customerId}/cards`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultCardRequest {
    pub payment_token_id: String,
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<RedirectUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of `PUT /v1/customers/{customerId}/cards/{cardToken}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultCardRequest {
    pub is_default: bool,
}

/// Card stored against a customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultedCardResponse {
    pub card_token_id: String,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub card_type: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub masked_pan: Option<String>,
    /// `PREVERIFICATION`, `VERIFIED`, ...
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub default: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub verification_url: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
