//! API manager: one method per remote endpoint.
//!
//! Every method follows the same steps. It picks the key for the endpoint,
//! appends the path to the base URL with path parameters inserted verbatim,
//! serializes the body, sends it through the transport and returns the raw
//! response text untouched. Interpreting that text is left to
//! [`response`](crate::response) and the resource models.

use std::collections::BTreeMap;

use paymaya_types::{
    CardPaymentRequest, ConvenienceFeeRequest, CreatePaymentRequest, CreatePaymentTokenRequest,
    CreateSubscriptionRequest, CustomerDetails, DefaultCardRequest, RefundRequest,
    VaultCardRequest, VoidRequest, WebhookRequest,
};
use serde::Serialize;
use tracing::debug;

use crate::{
    auth::{ApiKeyRole, basic_auth_header},
    config::PaymentsConfig,
    error::Result,
    transport::{HttpMethod, HttpRequest, ReqwestTransport, Transport},
};

/// Client for the PayMaya Payments API
///
/// Holds read-only configuration and a transport, so it can be cloned and
/// shared freely.
///
/// # Example
///
/// ```ignore
/// use paymaya_sdk::{PaymentsApi, PaymentsConfig};
///
/// let api = PaymentsApi::new(PaymentsConfig::from_env()?)?;
/// let raw = api.retrieve_webhooks().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PaymentsApi<T = ReqwestTransport> {
    config: PaymentsConfig,
    transport: T,
}

impl PaymentsApi<ReqwestTransport> {
    /// Create a client backed by `reqwest`, honouring the configured timeout
    pub fn new(config: PaymentsConfig) -> Result<Self> {
        let transport = match config.timeout {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::new(),
        };
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> PaymentsApi<T> {
    pub fn with_transport(config: PaymentsConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &PaymentsConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Base URL in use, selected by the environment unless overridden
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    fn api_key(&self, role: ApiKeyRole) -> &str {
        match role {
            ApiKeyRole::Public => &self.config.public_key,
            ApiKeyRole::Secret => &self.config.secret_key,
        }
    }

    async fn send(
        &self,
        method: HttpMethod,
        role: ApiKeyRole,
        path: &str,
        body: Option<String>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url(), path);

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "Authorization".to_string(),
            basic_auth_header(self.api_key(role)),
        );

        debug!(method = %method, url = %url, key = %role, "Sending request");

        self.transport
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        role: ApiKeyRole,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let payload = serde_json::to_string(body)?;
        self.send(method, role, path, Some(payload)).await
    }

    // Tokenized payments

    /// `POST /v1/payment-tokens`. The only call made with the public key.
    pub async fn create_payment_token(&self, request: &CreatePaymentTokenRequest) -> Result<String> {
        self.send_json(
            HttpMethod::Post,
            ApiKeyRole::Public,
            "/v1/payment-tokens",
            request,
        )
        .await
    }

    /// `POST /v1/payments`: charge a payment token
    pub async fn create_payment_with_token(&self, request: &CreatePaymentRequest) -> Result<String> {
        self.send_json(HttpMethod::Post, ApiKeyRole::Secret, "/v1/payments", request)
            .await
    }

    /// `GET /v1/payments/{paymentId}`
    pub async fn retrieve_payment(&self, payment_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/payments/{payment_id}"),
            None,
        )
        .await
    }

    /// `GET /v1/payments-rrns/{requestReferenceNumber}`
    pub async fn check_payment_status(&self, request_reference_number: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/payments-rrns/{request_reference_number}"),
            None,
        )
        .await
    }

    // Card vault: customers

    /// `POST /v1/customers`
    pub async fn register_customer(&self, details: &CustomerDetails) -> Result<String> {
        self.send_json(HttpMethod::Post, ApiKeyRole::Secret, "/v1/customers", details)
            .await
    }

    /// `GET /v1/customers/{customerId}`
    pub async fn retrieve_customer(&self, customer_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}"),
            None,
        )
        .await
    }

    /// `PUT /v1/customers/{customerId}`
    pub async fn update_customer_details(
        &self,
        customer_id: &str,
        details: &CustomerDetails,
    ) -> Result<String> {
        self.send_json(
            HttpMethod::Put,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}"),
            details,
        )
        .await
    }

    /// `DELETE /v1/customers/{customerId}`
    pub async fn unregister_customer(&self, customer_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Delete,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}"),
            None,
        )
        .await
    }

    // Card vault: cards

    /// `POST /v1/customers/{customerId}/cards`: vault the card behind a payment token
    pub async fn vault_card(&self, customer_id: &str, request: &VaultCardRequest) -> Result<String> {
        self.send_json(
            HttpMethod::Post,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards"),
            request,
        )
        .await
    }

    /// `GET /v1/customers/{customerId}/cards`
    pub async fn retrieve_customer_vaulted_cards(&self, customer_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards"),
            None,
        )
        .await
    }

    /// `GET /v1/customers/{customerId}/cards/{cardToken}`
    pub async fn retrieve_customer_vaulted_card(
        &self,
        customer_id: &str,
        card_token: &str,
    ) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards/{card_token}"),
            None,
        )
        .await
    }

    /// `DELETE /v1/customers/{customerId}/cards/{cardToken}`: deactivates the card permanently
    pub async fn delete_customer_vaulted_card(
        &self,
        customer_id: &str,
        card_token: &str,
    ) -> Result<String> {
        self.send(
            HttpMethod::Delete,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards/{card_token}"),
            None,
        )
        .await
    }

    /// `PUT /v1/customers/{customerId}/cards/{cardToken}` with `{"isDefault": ...}`.
    ///
    /// Despite the generic verb, the endpoint only changes which card is the
    /// customer's default.
    pub async fn set_default_customer_vaulted_card(
        &self,
        customer_id: &str,
        card_token: &str,
        is_default: bool,
    ) -> Result<String> {
        self.send_json(
            HttpMethod::Put,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards/{card_token}"),
            &DefaultCardRequest { is_default },
        )
        .await
    }

    /// `POST /v1/customers/{customerId}/cards/{cardToken}`: charge a vaulted card
    pub async fn execute_payment(
        &self,
        customer_id: &str,
        card_token: &str,
        request: &CardPaymentRequest,
    ) -> Result<String> {
        self.send_json(
            HttpMethod::Post,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards/{card_token}"),
            request,
        )
        .await
    }

    // Subscriptions

    /// `POST /v1/customers/{customerId}/cards/{cardToken}/subscriptions`
    pub async fn create_customer_subscription(
        &self,
        customer_id: &str,
        card_token: &str,
        request: &CreateSubscriptionRequest,
    ) -> Result<String> {
        self.send_json(
            HttpMethod::Post,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards/{card_token}/subscriptions"),
            request,
        )
        .await
    }

    /// `GET /v1/customers/{customerId}/cards/{cardToken}/subscriptions`
    pub async fn retrieve_customer_subscriptions(
        &self,
        customer_id: &str,
        card_token: &str,
    ) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/customers/{customer_id}/cards/{card_token}/subscriptions"),
            None,
        )
        .await
    }

    /// `GET /v1/subscriptions/{subscriptionId}`
    pub async fn get_subscription(&self, subscription_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/subscriptions/{subscription_id}"),
            None,
        )
        .await
    }

    /// `DELETE /v1/subscriptions/{subscriptionId}`: cancel a subscription
    pub async fn delete_subscription(&self, subscription_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Delete,
            ApiKeyRole::Secret,
            &format!("/v1/subscriptions/{subscription_id}"),
            None,
        )
        .await
    }

    /// `GET /v1/subscriptions/{subscriptionId}/payments`
    pub async fn retrieve_subscription_payments(&self, subscription_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/subscriptions/{subscription_id}/payments"),
            None,
        )
        .await
    }

    // Webhooks

    /// `GET /v1/webhooks`
    pub async fn retrieve_webhooks(&self) -> Result<String> {
        self.send(HttpMethod::Get, ApiKeyRole::Secret, "/v1/webhooks", None)
            .await
    }

    /// `GET /v1/webhooks/{webhookId}`
    pub async fn retrieve_webhook(&self, webhook_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/webhooks/{webhook_id}"),
            None,
        )
        .await
    }

    /// `POST /v1/webhooks`
    pub async fn register_webhook(&self, request: &WebhookRequest) -> Result<String> {
        self.send_json(HttpMethod::Post, ApiKeyRole::Secret, "/v1/webhooks", request)
            .await
    }

    /// `PUT /v1/webhooks/{webhookId}`
    pub async fn update_webhook(&self, webhook_id: &str, request: &WebhookRequest) -> Result<String> {
        self.send_json(
            HttpMethod::Put,
            ApiKeyRole::Secret,
            &format!("/v1/webhooks/{webhook_id}"),
            request,
        )
        .await
    }

    /// `DELETE /v1/webhooks/{webhookId}`
    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Delete,
            ApiKeyRole::Secret,
            &format!("/v1/webhooks/{webhook_id}"),
            None,
        )
        .await
    }

    // Voids and refunds

    /// `DELETE /v1/checkouts/{paymentId}` with a `reason` body.
    ///
    /// Invalidates a payment the buyer authorized, before settlement.
    pub async fn void_payment(&self, payment_id: &str, request: &VoidRequest) -> Result<String> {
        self.send_json(
            HttpMethod::Delete,
            ApiKeyRole::Secret,
            &format!("/v1/checkouts/{payment_id}"),
            request,
        )
        .await
    }

    /// `GET /v1/payments/{paymentId}/voids`
    pub async fn retrieve_void_transactions(&self, payment_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/payments/{payment_id}/voids"),
            None,
        )
        .await
    }

    /// `GET /v1/payments/{paymentId}/voids/{voidId}`
    pub async fn retrieve_void_transaction(&self, payment_id: &str, void_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/payments/{payment_id}/voids/{void_id}"),
            None,
        )
        .await
    }

    /// `POST /v1/payments/{paymentId}/refunds`: full or partial refund
    pub async fn refund_payment(&self, payment_id: &str, request: &RefundRequest) -> Result<String> {
        self.send_json(
            HttpMethod::Post,
            ApiKeyRole::Secret,
            &format!("/v1/payments/{payment_id}/refunds"),
            request,
        )
        .await
    }

    /// `GET /v1/payments/{paymentId}/refunds`
    pub async fn retrieve_refunds(&self, payment_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/payments/{payment_id}/refunds"),
            None,
        )
        .await
    }

    /// `GET /v1/payments/{paymentId}/refunds/{refundId}`
    pub async fn retrieve_refund(&self, payment_id: &str, refund_id: &str) -> Result<String> {
        self.send(
            HttpMethod::Get,
            ApiKeyRole::Secret,
            &format!("/v1/payments/{payment_id}/refunds/{refund_id}"),
            None,
        )
        .await
    }

    // Fees

    /// `POST /v1/fees`. Only available to merchants with a merchant discount
    /// rate configured; with an MDR of 3.7%, a 1000 PHP charge carries a
    /// 38.42 PHP fee.
    pub async fn compute_convenience_fee(&self, request: &ConvenienceFeeRequest) -> Result<String> {
        self.send_json(HttpMethod::Post, ApiKeyRole::Secret, "/v1/fees", request)
            .await
    }
}
