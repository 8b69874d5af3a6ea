use paymaya_types::{Amount, PaymentResponse, SubscriptionInterval, SubscriptionResponse};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::{
    api::PaymentsApi,
    error::Result,
    resources::{ResourceState, require_id, settle},
    response,
    transport::Transport,
};

/// Recurring charge on a vaulted card.
///
/// Subscriptions are created through
/// [`VaultedCard::create_subscription`](crate::VaultedCard::create_subscription);
/// this model covers what can be done with one afterwards.
#[derive(Debug, Clone, Default)]
pub struct Subscription {
    pub id: Option<String>,
    pub description: Option<String>,
    pub total_amount: Option<Amount>,
    pub interval: Option<SubscriptionInterval>,
    pub interval_count: Option<u32>,
    pub start_date: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    resource_state: ResourceState,
}

impl Subscription {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub(crate) fn from_response(response: SubscriptionResponse) -> Self {
        let mut subscription = Self {
            resource_state: ResourceState::Populated,
            ..Default::default()
        };
        subscription.apply(response);
        subscription
    }

    pub fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn apply(&mut self, response: SubscriptionResponse) {
        self.id = Some(response.id);
        self.description = response.description;
        self.total_amount = response.total_amount;
        self.interval = response.interval;
        self.interval_count = response.interval_count;
        self.start_date = response.start_date;
        self.status = response.status;
        self.created_at = response.created_at;
        self.updated_at = response.updated_at;
    }

    /// Refresh the model from the server
    pub async fn retrieve<T: Transport>(
        &mut self,
        api: &PaymentsApi<T>,
    ) -> Result<SubscriptionResponse> {
        let id = require_id(&self.id, "subscription id")?.to_string();

        self.resource_state = ResourceState::Pending;
        let outcome = match api.get_subscription(&id).await {
            Ok(raw) => response::decode::<SubscriptionResponse>(&raw),
            Err(err) => Err(err),
        };
        let subscription = settle(&mut self.resource_state, "subscription", "retrieve", outcome)?;

        self.apply(subscription.clone());
        Ok(subscription)
    }

    /// Stop future charges; clears `id` on success
    pub async fn cancel<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<JsonValue> {
        let id = require_id(&self.id, "subscription id")?.to_string();

        self.resource_state = ResourceState::Pending;
        let outcome = match api.delete_subscription(&id).await {
            Ok(raw) => response::check(&raw),
            Err(err) => Err(err),
        };
        let cancelled = settle(&mut self.resource_state, "subscription", "cancel", outcome)?;

        self.id = None;
        info!(subscription_id = %id, "Subscription cancelled");

        Ok(cancelled)
    }

    /// Charges made so far under this subscription
    pub async fn payments<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<Vec<PaymentResponse>> {
        let id = require_id(&self.id, "subscription id")?;
        let raw = api.retrieve_subscription_payments(id).await?;
        response::decode_list(&raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        error::PaymentsError,
        resources::test_support::{api, remote_error},
        transport::HttpMethod,
    };

    #[tokio::test]
    async fn test_retrieve_refreshes_fields() {
        let (api, transport) = api();
        transport.push_json(json!({
            "id": "sub_1",
            "description": "Coffee club",
            "totalAmount": {"amount": 350.0, "currency": "PHP"},
            "interval": "YEAR",
            "intervalCount": 2,
            "startDate": "2026-11-01",
            "status": "ACTIVE"
        }));

        let mut subscription = Subscription::with_id("sub_1");
        subscription.retrieve(&api).await.unwrap();

        assert_eq!(subscription.interval, Some(SubscriptionInterval::Year));
        assert_eq!(subscription.interval_count, Some(2));
        assert_eq!(subscription.total_amount, Some(Amount::php(350.0)));
        assert_eq!(subscription.status.as_deref(), Some("ACTIVE"));
        assert!(transport.last_request().unwrap().url.ends_with("/v1/subscriptions/sub_1"));
    }

    #[tokio::test]
    async fn test_cancel_clears_id() {
        let (api, transport) = api();
        transport.push_json(json!({"id": "sub_1", "status": "CANCELLED"}));

        let mut subscription = Subscription::with_id("sub_1");
        subscription.cancel(&api).await.unwrap();

        assert!(subscription.id.is_none());
        assert_eq!(transport.last_request().unwrap().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_failed_cancel_keeps_id() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let mut subscription = Subscription::with_id("sub_1");
        assert!(subscription.cancel(&api).await.unwrap_err().is_remote());
        assert_eq!(subscription.id.as_deref(), Some("sub_1"));
        assert_eq!(subscription.resource_state(), ResourceState::Failed);
    }

    #[tokio::test]
    async fn test_payments_list() {
        let (api, transport) = api();
        transport.push_json(json!([
            {"id": "pay_1", "isPaid": true},
            {"id": "pay_2", "isPaid": false}
        ]));

        let payments = Subscription::with_id("sub_1").payments(&api).await.unwrap();

        assert_eq!(payments.len(), 2);
        assert_eq!(payments[1].is_paid, Some(false));
        assert!(
            transport
                .last_request()
                .unwrap()
                .url
                .ends_with("/v1/subscriptions/sub_1/payments")
        );
    }

    #[tokio::test]
    async fn test_payments_rejects_non_list() {
        let (api, transport) = api();
        transport.push_response("\"not a list\"");

        let err = Subscription::with_id("sub_1").payments(&api).await.unwrap_err();
        assert!(matches!(err, PaymentsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_retrieve_remote_error_keeps_model() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let mut subscription = Subscription::with_id("sub_1");
        subscription.status = Some("ACTIVE".to_string());
        let err = subscription.retrieve(&api).await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(subscription.id.as_deref(), Some("sub_1"));
        assert_eq!(subscription.status.as_deref(), Some("ACTIVE"));
        assert_eq!(subscription.resource_state(), ResourceState::Failed);
    }

    #[tokio::test]
    async fn test_retrieve_tolerates_unexpected_interval_types() {
        let (api, transport) = api();
        transport.push_json(json!({
            "id": "sub_1",
            "interval": "FORTNIGHT",
            "intervalCount": "2",
            "totalAmount": {"amount": "350.00", "currency": "PHP"}
        }));

        let mut subscription = Subscription::with_id("sub_1");
        subscription.retrieve(&api).await.unwrap();

        assert_eq!(subscription.interval, None);
        assert_eq!(subscription.interval_count, Some(2));
        assert_eq!(subscription.total_amount, Some(Amount::php(350.0)));
    }
}
