use paymaya_types::{
    Amount, Buyer, CreatePaymentRequest, Metadata, PaymentResponse, RedirectUrl, RefundRequest,
    RefundResponse, VoidRequest, VoidResponse,
};
use tracing::info;

use crate::{
    api::PaymentsApi,
    error::{PaymentsError, Result},
    resources::{ResourceState, require_id, settle},
    response,
    transport::Transport,
};

/// A charge against a payment token.
///
/// Fill in the token, amount and optional buyer/redirect details, then call
/// [`execute`](Payment::execute). The API tries to charge the card right
/// away; when 3-D Secure applies, `verification_url` is where the buyer has
/// to go next.
#[derive(Debug, Clone, Default)]
pub struct Payment {
    pub id: Option<String>,
    pub verification_url: Option<String>,

    pub request_reference_number: Option<String>,
    pub payment_token_id: Option<String>,
    pub buyer: Option<Buyer>,
    pub total_amount: Option<Amount>,
    pub redirect_url: Option<RedirectUrl>,
    pub metadata: Option<Metadata>,

    resource_state: ResourceState,
}

impl Payment {
    pub fn new(payment_token_id: impl Into<String>, total_amount: Amount) -> Self {
        Self {
            payment_token_id: Some(payment_token_id.into()),
            total_amount: Some(total_amount),
            ..Default::default()
        }
    }

    /// Model for an existing payment, to retrieve, void or refund it
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn to_request(&self) -> Result<CreatePaymentRequest> {
        Ok(CreatePaymentRequest {
            payment_token_id: self
                .payment_token_id
                .clone()
                .ok_or(PaymentsError::MissingField("payment_token_id"))?,
            total_amount: self
                .total_amount
                .clone()
                .ok_or(PaymentsError::MissingField("total_amount"))?,
            request_reference_number: self.request_reference_number.clone(),
            buyer: self.buyer.clone(),
            redirect_url: self.redirect_url.clone(),
            metadata: self.metadata.clone(),
        })
    }

    /// Create the payment; copies `id` and `verificationUrl` back on success
    pub async fn execute<T: Transport>(&mut self, api: &PaymentsApi<T>) -> Result<PaymentResponse> {
        let request = self.to_request()?;

        self.resource_state = ResourceState::Pending;
        let outcome = match api.create_payment_with_token(&request).await {
            Ok(raw) => response::decode::<PaymentResponse>(&raw),
            Err(err) => Err(err),
        };
        let payment = settle(&mut self.resource_state, "payment", "execute", outcome)?;

        self.id = Some(payment.id.clone());
        self.verification_url = payment.verification_url.clone();
        info!(payment_id = %payment.id, status = ?payment.status, "Payment created");

        Ok(payment)
    }

    /// Fetch the payment by `id` without modifying the model
    pub async fn retrieve<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<PaymentResponse> {
        let id = require_id(&self.id, "payment id")?;
        let raw = api.retrieve_payment(id).await?;
        response::decode(&raw)
    }

    /// Look the payment up by its `request_reference_number`
    pub async fn status_by_reference<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
    ) -> Result<PaymentResponse> {
        let reference = self
            .request_reference_number
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or(PaymentsError::MissingField("request_reference_number"))?;
        let raw = api.check_payment_status(reference).await?;
        response::decode(&raw)
    }

    /// Void the payment before settlement
    pub async fn void<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
        reason: impl Into<String>,
    ) -> Result<VoidResponse> {
        let id = require_id(&self.id, "payment id")?;
        let raw = api.void_payment(id, &VoidRequest::new(reason)).await?;
        let voided: VoidResponse = response::decode(&raw)?;
        info!(payment_id = %id, void_id = %voided.id, "Payment voided");
        Ok(voided)
    }

    /// Every void attempt made on this payment
    pub async fn voids<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<Vec<VoidResponse>> {
        let id = require_id(&self.id, "payment id")?;
        let raw = api.retrieve_void_transactions(id).await?;
        response::decode_list(&raw)
    }

    pub async fn void_transaction<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
        void_id: &str,
    ) -> Result<VoidResponse> {
        let id = require_id(&self.id, "payment id")?;
        let raw = api.retrieve_void_transaction(id, void_id).await?;
        response::decode(&raw)
    }

    /// Refund all or part of a successful payment
    pub async fn refund<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
        total_amount: Amount,
        reason: impl Into<String>,
    ) -> Result<RefundResponse> {
        let id = require_id(&self.id, "payment id")?;
        let raw = api
            .refund_payment(id, &RefundRequest::new(total_amount, reason))
            .await?;
        let refund: RefundResponse = response::decode(&raw)?;
        info!(payment_id = %id, refund_id = %refund.id, "Payment refunded");
        Ok(refund)
    }

    /// Every refund attempt made on this payment
    pub async fn refunds<T: Transport>(&self, api: &PaymentsApi<T>) -> Result<Vec<RefundResponse>> {
        let id = require_id(&self.id, "payment id")?;
        let raw = api.retrieve_refunds(id).await?;
        response::decode_list(&raw)
    }

    pub async fn refund_info<T: Transport>(
        &self,
        api: &PaymentsApi<T>,
        refund_id: &str,
    ) -> Result<RefundResponse> {
        let id = require_id(&self.id, "payment id")?;
        let raw = api.retrieve_refund(id, refund_id).await?;
        response::decode(&raw)
    }
}
