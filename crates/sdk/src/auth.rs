//! Basic-auth header selection.
//!
//! Only payment token creation may run with the public key, since it is the
//! one call meant to be reachable from a browser-facing flow. Everything after
//! tokenization needs the secret key.

use base64::Engine as _;

/// Which of the two API keys an endpoint requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyRole {
    Public,
    Secret,
}

impl std::fmt::Display for ApiKeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiKeyRole::Public => write!(f, "public"),
            ApiKeyRole::Secret => write!(f, "secret"),
        }
    }
}

/// `Authorization` header value for an API key: `Basic base64("<key>:")`
pub fn basic_auth_header(api_key: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{api_key}:"));
    format!("Basic {token}")
}
