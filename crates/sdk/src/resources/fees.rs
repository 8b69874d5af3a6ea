use paymaya_types::{ConvenienceFeeRequest, ConvenienceFeeResponse};

use crate::{api::PaymentsApi, error::Result, response, transport::Transport};

/// Convenience fee computation for merchants with a configured discount rate
pub struct ConvenienceFee;

impl ConvenienceFee {
    pub async fn compute<T: Transport>(
        api: &PaymentsApi<T>,
        request: &ConvenienceFeeRequest,
    ) -> Result<ConvenienceFeeResponse> {
        let raw = api.compute_convenience_fee(request).await?;
        response::decode(&raw)
    }
}

#[cfg(test)]
mod tests {
    use paymaya_types::Amount;
    use serde_json::json;

    use super::*;
    use crate::resources::test_support::{api, remote_error};

    #[tokio::test]
    async fn test_compute_fee() {
        let (api, transport) = api();
        transport.push_json(json!({
            "totalAmount": {"amount": 1038.42, "currency": "PHP"},
            "convenienceFee": {"amount": 38.42, "currency": "PHP"}
        }));

        let fee = ConvenienceFee::compute(&api, &ConvenienceFeeRequest::new(Amount::php(1000.0)))
            .await
            .unwrap();

        assert_eq!(fee.convenience_fee, Some(Amount::php(38.42)));
        let request = transport.last_request().unwrap();
        assert!(request.url.ends_with("/v1/fees"));
        assert!(request.body.unwrap().contains("\"totalAmount\""));
    }

    #[tokio::test]
    async fn test_compute_fee_without_mdr() {
        let (api, transport) = api();
        transport.push_json(remote_error());

        let err = ConvenienceFee::compute(&api, &ConvenienceFeeRequest::new(Amount::php(1.0)))
            .await
            .unwrap_err();
        assert!(err.is_remote());
    }
}
