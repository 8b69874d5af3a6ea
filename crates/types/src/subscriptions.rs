use serde::{Deserialize, Serialize};

use crate::common::{Amount, Extra};

/// Billing interval of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionInterval {
    Day,
    Month,
    Year,
}

impl std::fmt::Display for SubscriptionInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionInterval::Day => write!(f, "DAY"),
            SubscriptionInterval::Month => write!(f, "MONTH"),
            SubscriptionInterval::Year => write!(f, "YEAR"),
        }
    }
}

/// Body of `POST /v1/customers/{customerId}/cards/{cardToken}/subscriptions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub description: String,
    pub total_amount: Amount,
    pub interval: SubscriptionInterval,
    pub interval_count: u32,
    /// First billing date, `YYYY-MM-DD`
    pub start_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: String,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub total_amount: Option<Amount>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub interval: Option<SubscriptionInterval>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub interval_count: Option<u32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
