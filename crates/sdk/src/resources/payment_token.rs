use paymaya_types::{Card, CreatePaymentTokenRequest, PaymentResponse, PaymentTokenResponse};
use tracing::info;

use crate::{
    api::PaymentsApi,
    error::{PaymentsError, Result},
    resources::{ResourceState, require_id, settle},
    response,
    transport::Transport,
};

/// Single-use stand-in for a buyer's card details.
///
/// Card details are only ever sent, never read back; everything else is
/// filled in from the server on [`execute`](PaymentToken::execute).
#[derive(Debug, Clone, Default)]
pub struct PaymentToken {
    pub id: Option<String>,

    /// Input for `execute`
    pub card: Option<Card>,

    pub state: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub issuer: Option<String>,

    resource_state: ResourceState,
}

impl PaymentToken {
    pub fn new(card: Card) -> Self {
        Self {
            card: Some(card),
            ..Default::default()
        }
    }

    pub fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    /// Create the token from `card` with the public key.
    ///
    /// On success `id` holds the new `paymentTokenId`. The token is valid for
    /// a limited time and a single payment.
    pub async fn execute<T: Transport>(
        &mut self,
        api: &PaymentsApi<T>,
    ) -> Result<PaymentTokenResponse> {
        let card = self
            .card
            .clone()
            .ok_or(PaymentsError::MissingField("card"))?;
        let request = CreatePaymentTokenRequest { card };

        self.resource_state = ResourceState::Pending;
        let outcome = match api.create_payment_token(&request).await {
            Ok(raw) => response::decode::<PaymentTokenResponse>(&raw),
            Err(err) => Err(err),
        };
        let token = settle(&mut self.resource_state, "payment_token", "execute", outcome)?;

        self.id = Some(token.payment_token_id.clone());
        self.state = token.state.clone();
        self.created_at = token.created_at.clone();
        self.updated_at = token.updated_at.clone();
        self.issuer = token.issuer.clone();
        info!(state = ?self.state, "Payment token created");

        Ok(token)
    }

    /// Look the token's payment up by `id` through the payment retrieval
    /// endpoint. Does not modify the model.
    pub async fn retrieve<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<PaymentResponse> {
        let id = require_id(&self.id, "payment token id")?;
        let raw = api.retrieve_payment(id).await?;
        response::decode(&raw)
    }
}
