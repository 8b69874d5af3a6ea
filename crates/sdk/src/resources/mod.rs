//! Resource models.
//!
//! A model is a local value the caller fills in before an action and reads
//! back afterwards. Actions take the [`PaymentsApi`](crate::PaymentsApi) to
//! use explicitly; models never hold a client of their own.
//!
//! Every action follows the same lifecycle: the model moves to
//! [`ResourceState::Pending`] while the request is in flight, then to
//! [`ResourceState::Populated`] when the response was a valid resource (and
//! its recognised fields were copied back), or to [`ResourceState::Failed`]
//! otherwise. A failed action never touches the model's identifying fields.

use tracing::warn;

use crate::error::{PaymentsError, Result};

pub mod customer;
pub mod fees;
pub mod payment;
pub mod payment_token;
pub mod subscription;
pub mod vaulted_card;
pub mod webhook;

pub use customer::Customer;
pub use fees::ConvenienceFee;
pub use payment::Payment;
pub use payment_token::PaymentToken;
pub use subscription::Subscription;
pub use vaulted_card::VaultedCard;
pub use webhook::Webhook;

/// Where a model stands relative to the remote resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResourceState {
    /// No action has been sent yet
    #[default]
    Unsent,

    /// A request is in flight
    Pending,

    /// Last action succeeded and the model reflects the server
    Populated,

    /// Last action failed; identifying fields are unchanged
    Failed,
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceState::Unsent => write!(f, "unsent"),
            ResourceState::Pending => write!(f, "pending"),
            ResourceState::Populated => write!(f, "populated"),
            ResourceState::Failed => write!(f, "failed"),
        }
    }
}

/// Record the outcome of an action on `state` and pass it through
pub(crate) fn settle<R>(
    state: &mut ResourceState,
    resource: &'static str,
    action: &'static str,
    outcome: Result<R>,
) -> Result<R> {
    match &outcome {
        Ok(_) => *state = ResourceState::Populated,
        Err(err) => {
            *state = ResourceState::Failed;
            warn!(resource, action, error = %err, "Action failed");
        }
    }
    outcome
}

/// Borrow a required identifier or fail before any request is made
pub(crate) fn require_id<'a>(id: &'a Option<String>, what: &'static str) -> Result<&'a str> {
    match id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(PaymentsError::MissingId(what)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{api::PaymentsApi, config::PaymentsConfig, transport::RecordingTransport};

    pub const PUBLIC_KEY: &str = "pk-test-public";
    pub const SECRET_KEY: &str = "sk-test-secret";

    pub fn api() -> (PaymentsApi<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::new();
        let api = PaymentsApi::with_transport(
            PaymentsConfig::new(PUBLIC_KEY, SECRET_KEY),
            transport.clone(),
        );
        (api, transport)
    }

    pub fn remote_error() -> serde_json::Value {
        serde_json::json!({"code": "PY0009", "message": "Resource not found"})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_tracks_outcome() {
        let mut state = ResourceState::Pending;
        let ok = settle(&mut state, "webhook", "register", Ok(1));
        assert_eq!(ok.unwrap(), 1);
        assert_eq!(state, ResourceState::Populated);

        let err: Result<()> = settle(
            &mut state,
            "webhook",
            "register",
            Err(PaymentsError::Decode("bad".to_string())),
        );
        assert!(err.is_err());
        assert_eq!(state, ResourceState::Failed);
    }

    #[test]
    fn test_require_id_rejects_empty() {
        assert!(require_id(&None, "webhook id").is_err());
        assert!(require_id(&Some(String::new()), "webhook id").is_err());
        assert_eq!(require_id(&Some("w1".to_string()), "webhook id").unwrap(), "w1");
    }
}
