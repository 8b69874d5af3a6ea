//! HTTP transport used by the API manager.
//!
//! A transport performs exactly one exchange per call and hands back the
//! response body as text whatever the status code, leaving interpretation to
//! the caller. Failures to complete the exchange surface as transport errors;
//! nothing is retried.

use std::{collections::BTreeMap, collections::VecDeque, future::Future, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{PaymentsError, Result};

/// HTTP methods used by the Payments API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully built request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// JSON text; only present for POST/PUT and DELETE-with-reason
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Performs a single HTTP exchange
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response body
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<String>> + Send;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose requests fail with a timeout after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<String> {
        let url = url::Url::parse(&request.url)
            .map_err(|e| PaymentsError::InvalidUrl(format!("{}: {}", request.url, e)))?;
        if url.cannot_be_a_base() {
            return Err(PaymentsError::InvalidUrl(request.url));
        }

        let mut builder = self.client.request(request.method.into(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(method = %request.method, url = %request.url, error = %e, "Request failed");
            PaymentsError::Http(e)
        })?;

        let status = response.status();
        debug!(method = %request.method, url = %request.url, status = %status, "Received response");

        Ok(response.text().await?)
    }
}

/// Scripted reply for [`RecordingTransport`]
#[derive(Debug, Clone)]
enum ScriptedReply {
    Body(String),
    Unreachable(String),
}

/// In-memory transport that records every request and answers from a queue.
///
/// Meant for tests of code built on the SDK; clones share the same queue and
/// request log.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body for the next request
    pub fn push_response(&self, body: impl Into<String>) -> &Self {
        self.replies.lock().push_back(ScriptedReply::Body(body.into()));
        self
    }

    /// Queue a serialized JSON value as the next response body
    pub fn push_json(&self, value: serde_json::Value) -> &Self {
        self.push_response(value.to_string())
    }

    /// Make the next request fail as if the host were unreachable
    pub fn push_failure(&self, reason: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .push_back(ScriptedReply::Unreachable(reason.into()));
        self
    }

    /// Every request sent so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<String> {
        self.requests.lock().push(request);
        let reply = self.replies.lock().pop_front();
        match reply {
            Some(ScriptedReply::Body(body)) => Ok(body),
            Some(ScriptedReply::Unreachable(reason)) => Err(PaymentsError::Connection(reason)),
            None => Err(PaymentsError::Connection(
                "no scripted response left".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_recording_transport_replays_in_order() {
        let transport = RecordingTransport::new();
        transport.push_response("first").push_failure("connection refused");

        assert_eq!(transport.execute(get("http://a/1")).await.unwrap(), "first");
        let err = transport.execute(get("http://a/2")).await.unwrap_err();
        assert!(err.is_transport());
        let err = transport.execute(get("http://a/3")).await.unwrap_err();
        assert!(err.is_transport());

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["http://a/1", "http://a/2", "http://a/3"]);
    }

    #[tokio::test]
    async fn test_reqwest_transport_rejects_relative_url() {
        let transport = ReqwestTransport::new();
        let err = transport.execute(get("/v1/webhooks")).await.unwrap_err();
        assert!(matches!(err, PaymentsError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_reqwest_transport_reports_unreachable_host() {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on localhost is closed on test machines.
        let err = transport
            .execute(get("http://127.0.0.1:9/v1/webhooks"))
            .await
            .unwrap_err();
        assert!(err.is_transport(), "unexpected error: {err}");
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
    }
}
