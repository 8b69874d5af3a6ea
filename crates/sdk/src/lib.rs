//! PayMaya Payments SDK
//!
//! Client for the PayMaya Payments API: payment tokens, payments, voids and
//! refunds, the customer card vault, subscriptions, webhooks and convenience
//! fees.
//!
//! # Overview
//!
//! The SDK is split in two layers:
//!
//! - [`PaymentsApi`] - one method per endpoint. Picks the base URL from the
//!   environment, signs each request with the right key and returns the raw
//!   response body.
//! - Resource models ([`PaymentToken`], [`Payment`], [`Customer`],
//!   [`VaultedCard`], [`Subscription`], [`Webhook`], [`ConvenienceFee`]) -
//!   local values you fill in, send through an API instance, and read back.
//!
//! Remote failures come back in-band as a document with `code`/`message`;
//! the models surface those as [`PaymentsError::Remote`], distinct from
//! transport failures.
//!
//! # Quick Start
//!
//! ```ignore
//! use paymaya_sdk::{Payment, PaymentToken, PaymentsApi, PaymentsConfig};
//! use paymaya_sdk::types::{Amount, Card};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // PAYMAYA_PUBLIC_KEY, PAYMAYA_SECRET_KEY, PAYMAYA_ENVIRONMENT
//!     let api = PaymentsApi::new(PaymentsConfig::from_env()?)?;
//!
//!     let mut token = PaymentToken::new(Card::new("5123456789012346", "12", "2031", "111"));
//!     token.execute(&api).await?;
//!
//!     let mut payment = Payment::new(token.id.clone().unwrap_or_default(), Amount::php(100.0));
//!     payment.execute(&api).await?;
//!
//!     if let Some(url) = &payment.verification_url {
//!         println!("Send the buyer to {url}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! [`RecordingTransport`] replays scripted bodies and records every request,
//! so code built on the SDK can be tested without network access:
//!
//! ```ignore
//! let transport = RecordingTransport::new();
//! transport.push_json(serde_json::json!({"paymentTokenId": "tok_1"}));
//! let api = PaymentsApi::with_transport(PaymentsConfig::new("pk", "sk"), transport.clone());
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod resources;
pub mod response;
pub mod transport;

pub use paymaya_types as types;

// Re-export main types at crate root
pub use api::PaymentsApi;
pub use auth::ApiKeyRole;
pub use config::PaymentsConfig;
pub use error::{PaymentsError, Result};
pub use paymaya_types::{Environment, WebhookEvent};
pub use resources::{
    ConvenienceFee, Customer, Payment, PaymentToken, ResourceState, Subscription, VaultedCard,
    Webhook,
};
pub use transport::{HttpMethod, HttpRequest, RecordingTransport, ReqwestTransport, Transport};
