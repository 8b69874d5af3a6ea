use paymaya_types::{WebhookEvent, WebhookRequest, WebhookResponse};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::{
    api::PaymentsApi,
    error::Result,
    resources::{ResourceState, require_id, settle},
    response,
    transport::Transport,
};

/// A callback URL the API calls on checkout lifecycle events
#[derive(Debug, Clone, Default)]
pub struct Webhook {
    pub id: Option<String>,
    pub name: Option<WebhookEvent>,
    pub callback_url: Option<String>,

    resource_state: ResourceState,
}

impl Webhook {
    pub fn new(name: WebhookEvent, callback_url: impl Into<String>) -> Self {
        Self {
            name: Some(name),
            callback_url: Some(callback_url.into()),
            ..Default::default()
        }
    }

    fn from_response(response: WebhookResponse) -> Self {
        Self {
            id: Some(response.id),
            name: response.name,
            callback_url: response.callback_url,
            resource_state: ResourceState::Populated,
        }
    }

    pub fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn to_request(&self) -> WebhookRequest {
        WebhookRequest {
            name: self.name.clone(),
            callback_url: self.callback_url.clone(),
        }
    }

    /// Every registered webhook, as populated models
    pub async fn retrieve_all<T: Transport>(api: &PaymentsApi<T>) -> Result<Vec<Webhook>> {
        let raw = api.retrieve_webhooks().await?;
        let hooks: Vec<WebhookResponse> = response::decode_list(&raw)?;
        Ok(hooks.into_iter().map(Self::from_response).collect())
    }

    /// A single registered webhook by id
    pub async fn retrieve<T: Transport>(api: &PaymentsApi<T>, webhook_id: &str) -> Result<Webhook> {
        let raw = api.retrieve_webhook(webhook_id).await?;
        let hook: WebhookResponse = response::decode(&raw)?;
        Ok(Self::from_response(hook))
    }

    /// Register `callback_url` for `name`; copies the new `id` back on success
    pub async fn register<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<WebhookResponse> {
        let request = self.to_request();

        self.resource_state = ResourceState::Pending;
        let outcome = match api.register_webhook(&request).await {
            Ok(raw) => response::decode::<WebhookResponse>(&raw),
            Err(err) => Err(err),
        };
        let hook = settle(&mut self.resource_state, "webhook", "register", outcome)?;

        self.id = Some(hook.id.clone());
        info!(webhook_id = %hook.id, name = ?self.name, "Webhook registered");

        Ok(hook)
    }

    /// Send the current name and callback URL; the model then mirrors the server
    pub async fn update<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<WebhookResponse> {
        let id = require_id(&self.id, "webhook id")?.to_string();
        let request = self.to_request();

        self.resource_state = ResourceState::Pending;
        let outcome = match api.update_webhook(&id, &request).await {
            Ok(raw) => response::decode::<WebhookResponse>(&raw),
            Err(err) => Err(err),
        };
        let hook = settle(&mut self.resource_state, "webhook", "update", outcome)?;

        self.id = Some(hook.id.clone());
        self.name = hook.name.clone();
        self.callback_url = hook.callback_url.clone();

        Ok(hook)
    }

    /// Unregister the webhook; clears `id`, `name` and `callback_url` on success
    pub async fn delete<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<JsonValue> {
        let id = require_id(&self.id, "webhook id")?.to_string();

        self.resource_state = ResourceState::Pending;
        let outcome = match api.delete_webhook(&id).await {
            Ok(raw) => response::check(&raw),
            Err(err) => Err(err),
        };
        let deleted = settle(&mut self.resource_state, "webhook", "delete", outcome)?;

        self.id = None;
        self.name = None;
        self.callback_url = None;
        info!(webhook_id = %id, "Webhook deleted");

        Ok(deleted)
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
    async fn test_register_sends_name_and_callback_only() {
        let (api, transport) = api();
        transport.push_json(json!({
            "id": "wh_1",
            "name": "CHECKOUT_SUCCESS",
            "callbackUrl": "https://example.com/hook"
        }));

        let mut hook = Webhook::new(WebhookEvent::CheckoutSuccess, "https://example.com/hook");
        hook.register(&api).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.url.ends_with("/v1/webhooks"));
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"name":"CHECKOUT_SUCCESS","callbackUrl":"https://example.com/hook"}"#)
        );
        assert_eq!(hook.id.as_deref(), Some("wh_1"));
        assert_eq!(hook.resource_state(), ResourceState::Populated);
    }

    #[tokio::test]
    async fn test_retrieve_all_builds_populated_models() {
        let (api, transport) = api();
        transport.push_json(json!([
            {"id": "wh_1", "name": "CHECKOUT_SUCCESS", "callbackUrl": "https://a.example/ok"},
            {"id": "wh_2", "name": "CHECKOUT_DROPOUT", "callbackUrl": "https://a.example/drop"}
        ]));

        let hooks = Webhook::retrieve_all(&api).await.unwrap();

        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[1].id.as_deref(), Some("wh_2"));
        assert_eq!(hooks[1].name, Some(WebhookEvent::CheckoutDropout));
        assert_eq!(hooks[1].callback_url.as_deref(), Some("https://a.example/drop"));
        assert!(hooks.iter().all(|h| h.resource_state() == ResourceState::Populated));
    }

    #[tokio::test]
    async fn test_retrieve_all_remote_error() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let err = Webhook::retrieve_all(&api).await.unwrap_err();
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_retrieve_single() {
        let (api, transport) = api();
        transport.push_json(json!({"id": "wh_9", "name": "CHECKOUT_FAILURE", "callbackUrl": "https://f"}));

        let hook = Webhook::retrieve(&api, "wh_9").await.unwrap();
        assert_eq!(hook.name, Some(WebhookEvent::CheckoutFailure));
        assert!(transport.last_request().unwrap().url.ends_with("/v1/webhooks/wh_9"));
    }

    #[tokio::test]
    async fn test_update_overwrites_with_server_values() {
        let (api, transport) = api();
        transport.push_json(json!({
            "id": "wh_1",
            "name": "CHECKOUT_FAILURE",
            "callbackUrl": "https://example.com/normalized"
        }));

        let mut hook = Webhook::new(WebhookEvent::CheckoutFailure, "https://example.com/new");
        hook.id = Some("wh_1".to_string());
        hook.update(&api).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert!(request.url.ends_with("/v1/webhooks/wh_1"));
        assert_eq!(hook.callback_url.as_deref(), Some("https://example.com/normalized"));
    }

    #[tokio::test]
    async fn test_delete_clears_identifying_fields() {
        let (api, transport) = api();
        transport.push_json(json!({
            "id": "wh_1",
            "name": "CHECKOUT_SUCCESS",
            "callbackUrl": "https://example.com/hook"
        }));

        let mut hook = Webhook::new(WebhookEvent::CheckoutSuccess, "https://example.com/hook");
        hook.id = Some("wh_1".to_string());
        hook.delete(&api).await.unwrap();

        assert!(hook.id.is_none());
        assert!(hook.name.is_none());
        assert!(hook.callback_url.is_none());
        assert_eq!(transport.last_request().unwrap().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_fields() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let mut hook = Webhook::new(WebhookEvent::CheckoutSuccess, "https://example.com/hook");
        hook.id = Some("wh_1".to_string());
        let err = hook.delete(&api).await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(hook.id.as_deref(), Some("wh_1"));
        assert_eq!(hook.name, Some(WebhookEvent::CheckoutSuccess));
        assert_eq!(hook.resource_state(), ResourceState::Failed);
    }

    #[tokio::test]
    async fn test_update_and_delete_need_an_id() {
        let (api, transport) = api();
        let mut hook = Webhook::new(WebhookEvent::CheckoutSuccess, "https://example.com/hook");

        assert!(matches!(
            hook.update(&api).await.unwrap_err(),
            PaymentsError::MissingId(_)
        ));
        assert!(matches!(
            hook.delete(&api).await.unwrap_err(),
            PaymentsError::MissingId(_)
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_distinct_from_remote_error() {
        let (api, transport) = api();
        transport.push_failure("connection reset by peer");

        let mut hook = Webhook::new(WebhookEvent::CheckoutSuccess, "https://example.com/hook");
        let err = hook.register(&api).await.unwrap_err();

        assert!(err.is_transport());
        assert!(!err.is_remote());
        assert!(hook.id.is_none());
        assert_eq!(hook.resource_state(), ResourceState::Failed);
    }

    #[tokio::test]
    async fn test_register_remote_error_leaves_model_unregistered() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let mut hook = Webhook::new(WebhookEvent::CheckoutSuccess, "https://example.com/hook");
        let err = hook.register(&api).await.unwrap_err();

        assert!(err.is_remote());
        assert!(hook.id.is_none());
        assert_eq!(hook.callback_url.as_deref(), Some("https://example.com/hook"));
        assert_eq!(hook.resource_state(), ResourceState::Failed);
    }

    #[tokio::test]
    async fn test_update_remote_error_keeps_local_values() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let mut hook = Webhook::new(WebhookEvent::CheckoutFailure, "https://example.com/new");
        hook.id = Some("wh_1".to_string());
        let err = hook.update(&api).await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(hook.id.as_deref(), Some("wh_1"));
        assert_eq!(hook.name, Some(WebhookEvent::CheckoutFailure));
        assert_eq!(hook.callback_url.as_deref(), Some("https://example.com/new"));
        assert_eq!(hook.resource_state(), ResourceState::Failed);
    }
}
