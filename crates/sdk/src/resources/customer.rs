use paymaya_types::{CustomerDetails, CustomerResponse, VaultCardRequest, VaultedCardResponse};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::{
    api::PaymentsApi,
    error::Result,
    resources::{ResourceState, VaultedCard, require_id, settle},
    response,
    transport::Transport,
};

/// Customer record in the card vault
#[derive(Debug, Clone, Default)]
pub struct Customer {
    pub id: Option<String>,

    /// Attributes sent on register and update
    pub details: CustomerDetails,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    resource_state: ResourceState,
}

impl Customer {
    pub fn new(details: CustomerDetails) -> Self {
        Self {
            details,
            ..Default::default()
        }
    }

    /// Model for an already registered customer
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn apply(&mut self, response: &CustomerResponse) {
        self.id = Some(response.id.clone());
        self.details = response.details.clone();
        self.created_at = response.created_at.clone();
        self.updated_at = response.updated_at.clone();
    }

    pub async fn register<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<CustomerResponse> {
        self.resource_state = ResourceState::Pending;
        let outcome = match api.register_customer(&self.details).await {
            Ok(raw) => response::decode::<CustomerResponse>(&raw),
            Err(err) => Err(err),
        };
        let customer = settle(&mut self.resource_state, "customer", "register", outcome)?;

        self.apply(&customer);
        info!(customer_id = %customer.id, "Customer registered");

        Ok(customer)
    }

    pub async fn retrieve<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<CustomerResponse> {
        let id = require_id(&self.id, "customer id")?;
        let raw = api.retrieve_customer(id).await?;
        response::decode(&raw)
    }

    /// Send the current details; the model then mirrors the server
    pub async fn update<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<CustomerResponse> {
        let id = require_id(&self.id, "customer id")?.to_string();

        self.resource_state = ResourceState::Pending;
        let outcome = match api.update_customer_details(&id, &self.details).await {
            Ok(raw) => response::decode::<CustomerResponse>(&raw),
            Err(err) => Err(err),
        };
        let customer = settle(&mut self.resource_state, "customer", "update", outcome)?;

        self.apply(&customer);
        Ok(customer)
    }

    /// Remove the customer from the vault; clears `id` and timestamps on success
    pub async fn delete<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<JsonValue> {
        let id = require_id(&self.id, "customer id")?.to_string();

        self.resource_state = ResourceState::Pending;
        let outcome = match api.unregister_customer(&id).await {
            Ok(raw) => response::check(&raw),
            Err(err) => Err(err),
        };
        let deleted = settle(&mut self.resource_state, "customer", "delete", outcome)?;

        self.id = None;
        self.created_at = None;
        self.updated_at = None;
        info!(customer_id = %id, "Customer unregistered");

        Ok(deleted)
    }

    /// Vault the card behind a payment token for this customer.
    ///
    /// The returned card may still need 3-D Secure verification; see its
    /// `verification_url`.
    pub async fn vault_card<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
        request: &VaultCardRequest,
    ) -> Result<VaultedCard> {
        let id = require_id(&self.id, "customer id")?;
        let raw = api.vault_card(id, request).await?;
        let card: VaultedCardResponse = response::decode(&raw)?;
        info!(customer_id = %id, card_token_id = %card.card_token_id, "Card vaulted");
        Ok(VaultedCard::from_response(id, card))
    }

    pub async fn vaulted_cards<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<Vec<VaultedCard>> {
        let id = require_id(&self.id, "customer id")?;
        let raw = api.retrieve_customer_vaulted_cards(id).await?;
        let cards: Vec<VaultedCardResponse> = response::decode_list(&raw)?;
        Ok(cards
            .into_iter()
            .map(|card| VaultedCard::from_response(id, card))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use paymaya_types::{Address, Contact, RedirectUrl};
    use serde_json::json;

    use super::*;
    use crate::{
        resources::test_support::{api, remote_error},
        transport::HttpMethod,
    };

    fn details() -> CustomerDetails {
        CustomerDetails {
            first_name: Some("Ysa".to_string()),
            last_name: Some("Cruz".to_string()),
            birthday: Some("1987-10-10".to_string()),
            sex: Some("F".to_string()),
            contact: Some(Contact {
                phone: Some("+63(2)1234567890".to_string()),
                email: Some("ysadcruz@gmail.com".to_string()),
            }),
            billing_address: Some(Address {
                line1: Some("9F Robinsons Cybergate 3".to_string()),
                city: Some("Mandaluyong City".to_string()),
                zip_code: Some("12345".to_string()),
                country_code: Some("PH".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_copies_server_record() {
        let (api, transport) = api();
        transport.push_json(json!({
            "id": "cus_1",
            "firstName": "Ysa",
            "lastName": "Cruz",
            "birthday": "1987-10-10",
            "sex": "F",
            "createdAt": "2026-10-18T08:42:46.000Z",
            "updatedAt": "2026-10-18T08:42:46.000Z"
        }));

        let mut customer = Customer::new(details());
        let response = customer.register(&api).await.unwrap();

        assert_eq!(customer.id.as_deref(), Some("cus_1"));
        assert_eq!(customer.details, response.details);
        assert_eq!(customer.created_at, response.created_at);
        assert_eq!(customer.resource_state(), ResourceState::Populated);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(&request.body.unwrap()).unwrap();
        assert_eq!(body["billingAddress"]["zipCode"], "12345");
        assert!(body.get("id").is_none());
        assert!(body.get("createdAt").is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (api, transport) = api();
        transport
            .push_json(json!({"id": "cus_1", "firstName": "Ysabel", "updatedAt": "2026-10-19"}))
            .push_json(json!({"id": "cus_1"}));

        let mut customer = Customer::with_id("cus_1");
        customer.details.first_name = Some("Ysabel".to_string());
        customer.update(&api).await.unwrap();
        assert_eq!(customer.details.first_name.as_deref(), Some("Ysabel"));
        assert_eq!(customer.updated_at.as_deref(), Some("2026-10-19"));

        customer.delete(&api).await.unwrap();
        assert!(customer.id.is_none());
        assert!(customer.updated_at.is_none());

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert!(requests[1].url.ends_with("/v1/customers/cus_1"));
    }

    #[tokio::test]
    async fn test_failed_update_keeps_local_values() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let mut customer = Customer::with_id("cus_1");
        customer.details.first_name = Some("Local".to_string());
        let err = customer.update(&api).await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(customer.id.as_deref(), Some("cus_1"));
        assert_eq!(customer.details.first_name.as_deref(), Some("Local"));
        assert_eq!(customer.resource_state(), ResourceState::Failed);
    }

    #[tokio::test]
    async fn test_vault_card_and_list() {
        let (api, transport) = api();
        transport
            .push_json(json!({
                "cardTokenId": "card_1",
                "cardType": "master-card",
                "maskedPan": "2346",
                "state": "PREVERIFICATION",
                "default": true,
                "verificationUrl": "https://pg-sandbox.paymaya.com/verify/card_1"
            }))
            .push_json(json!([
                {"cardTokenId": "card_1", "state": "VERIFIED", "default": true},
                {"cardTokenId": "card_2", "state": "VERIFIED", "default": false}
            ]));

        let customer = Customer::with_id("cus_1");
        let card = customer
            .vault_card(
                &api,
                &VaultCardRequest {
                    payment_token_id: "tok_1".to_string(),
                    is_default: true,
                    redirect_url: Some(RedirectUrl::new(
                        "https://shop.example/ok",
                        "https://shop.example/fail",
                        "https://shop.example/cancel",
                    )),
                    request_reference_number: None,
                    metadata: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(card.customer_id, "cus_1");
        assert_eq!(card.card_token_id.as_deref(), Some("card_1"));
        assert_eq!(card.is_default, Some(true));

        let cards = customer.vaulted_cards(&api).await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].card_token_id.as_deref(), Some("card_2"));

        let requests = transport.requests();
        assert!(requests[0].url.ends_with("/v1/customers/cus_1/cards"));
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["paymentTokenId"], "tok_1");
        assert_eq!(body["isDefault"], true);
    }
}
