use paymaya_types::{
    CardPaymentRequest, CreateSubscriptionRequest, PaymentResponse, SubscriptionResponse,
    VaultedCardResponse,
};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::{
    api::PaymentsApi,
    error::{PaymentsError, Result},
    resources::{ResourceState, Subscription, require_id, settle},
    response,
    transport::Transport,
};

/// A card stored in a customer's vault, addressed by `customer_id` and
/// `card_token_id`.
#[derive(Debug, Clone, Default)]
pub struct VaultedCard {
    pub customer_id: String,
    pub card_token_id: Option<String>,

    pub card_type: Option<String>,
    pub masked_pan: Option<String>,
    pub state: Option<String>,
    pub is_default: Option<bool>,
    /// 3-D Secure page to finish vaulting, when the card is not yet verified
    pub verification_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    resource_state: ResourceState,
}

impl VaultedCard {
    pub fn new(customer_id: impl Into<String>, card_token_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            card_token_id: Some(card_token_id.into()),
            ..Default::default()
        }
    }

    pub(crate) fn from_response(customer_id: &str, response: VaultedCardResponse) -> Self {
        let mut card = Self {
            customer_id: customer_id.to_string(),
            resource_state: ResourceState::Populated,
            ..Default::default()
        };
        card.apply(response);
        card
    }

    pub fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn apply(&mut self, response: VaultedCardResponse) {
        self.card_token_id = Some(response.card_token_id);
        self.card_type = response.card_type;
        self.masked_pan = response.masked_pan;
        self.state = response.state;
        self.is_default = response.default;
        self.verification_url = response.verification_url;
        self.created_at = response.created_at;
        self.updated_at = response.updated_at;
    }

    fn ids(&self) -> Result<(&str, &str)> {
        if self.customer_id.is_empty() {
            return Err(PaymentsError::MissingId("customer id"));
        }
        let customer_id = self.customer_id.as_str();
        let card_token = require_id(&self.card_token_id, "card token id")?;
        Ok((customer_id, card_token))
    }

    /// Refresh the model from the server
    pub async fn retrieve<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<VaultedCardResponse> {
        let (customer_id, card_token) = self.ids()?;
        let (customer_id, card_token) = (customer_id.to_string(), card_token.to_string());

        self.resource_state = ResourceState::Pending;
        let outcome = match api
            .retrieve_customer_vaulted_card(&customer_id, &card_token)
            .await
        {
            Ok(raw) => response::decode::<VaultedCardResponse>(&raw),
            Err(err) => Err(err),
        };
        let card = settle(&mut self.resource_state, "vaulted_card", "retrieve", outcome)?;

        self.apply(card.clone());
        Ok(card)
    }

    /// Deactivate the card permanently; clears `card_token_id` on success
    pub async fn delete<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<JsonValue> {
        let (customer_id, card_token) = self.ids()?;
        let (customer_id, card_token) = (customer_id.to_string(), card_token.to_string());

        self.resource_state = ResourceState::Pending;
        let outcome = match api
            .delete_customer_vaulted_card(&customer_id, &card_token)
            .await
        {
            Ok(raw) => response::check(&raw),
            Err(err) => Err(err),
        };
        let deleted = settle(&mut self.resource_state, "vaulted_card", "delete", outcome)?;

        self.card_token_id = None;
        info!(customer_id = %customer_id, card_token_id = %card_token, "Vaulted card deleted");

        Ok(deleted)
    }

    /// Make this the customer's default card
    pub async fn set_default<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<VaultedCardResponse> {
        let (customer_id, card_token) = self.ids()?;
        let (customer_id, card_token) = (customer_id.to_string(), card_token.to_string());

        self.resource_state = ResourceState::Pending;
        let outcome = match api
            .set_default_customer_vaulted_card(&customer_id, &card_token, true)
            .await
        {
            Ok(raw) => response::decode::<VaultedCardResponse>(&raw),
            Err(err) => Err(err),
        };
        let card = settle(&mut self.resource_state, "vaulted_card", "set_default", outcome)?;

        self.apply(card.clone());
        Ok(card)
    }

    /// Charge the card directly
    pub async fn execute_payment<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
        request: &CardPaymentRequest,
    ) -> Result<PaymentResponse> {
        let (customer_id, card_token) = self.ids()?;
        let raw = api.execute_payment(customer_id, card_token, request).await?;
        let payment: PaymentResponse = response::decode(&raw)?;
        info!(payment_id = %payment.id, card_token_id = %card_token, "Vaulted card charged");
        Ok(payment)
    }

    /// Start a recurring charge on the card
    pub async fn create_subscription<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
        request: &CreateSubscriptionRequest,
    ) -> Result<Subscription> {
        let (customer_id, card_token) = self.ids()?;
        let raw = api
            .create_customer_subscription(customer_id, card_token, request)
            .await?;
        let subscription: SubscriptionResponse = response::decode(&raw)?;
        info!(subscription_id = %subscription.id, card_token_id = %card_token, "Subscription created");
        Ok(Subscription::from_response(subscription))
    }

    pub async fn subscriptions<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<Vec<Subscription>> {
        let (customer_id, card_token) = self.ids()?;
        let raw = api
            .retrieve_customer_subscriptions(customer_id, card_token)
            .await?;
        let subscriptions: Vec<SubscriptionResponse> = response::decode_list(&raw)?;
        Ok(subscriptions
            .into_iter()
            .map(Subscription::from_response)
            .collect())
    }
}
