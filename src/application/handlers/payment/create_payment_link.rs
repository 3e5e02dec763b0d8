//! CreatePaymentLinkHandler - Command handler for signed checkout URLs.

use std::sync::Arc;

use tracing::info;

use crate::domain::gateway::{PaymentLinkBuilder, PaymentLinkError, PaymentRequest};
use crate::ports::ProviderStore;

/// Command to build a signed payment-initiation URL for an order.
#[derive(Debug, Clone)]
pub struct CreatePaymentLinkCommand {
    /// Provider code to build the link for.
    pub provider_code: String,
    /// Merchant reference of the pending order.
    pub reference: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Optional description override.
    pub description: Option<String>,
}

/// Result carrying the signed redirect URL.
#[derive(Debug, Clone)]
pub struct CreatePaymentLinkResult {
    pub payment_url: String,
}

/// Handler for payment-link creation.
pub struct CreatePaymentLinkHandler {
    providers: Arc<dyn ProviderStore>,
}

impl CreatePaymentLinkHandler {
    pub fn new(providers: Arc<dyn ProviderStore>) -> Self {
        Self { providers }
    }

    /// Builds the signed URL for one order.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` - amount is zero or negative
    /// - `ProviderNotConfigured` - no provider registered under the code
    /// - `Encoding` - secret or checksum input is not ASCII (configuration
    ///   fault, surfaced to the caller, never retried)
    /// - `Store` - the provider store failed
    pub async fn handle(
        &self,
        cmd: CreatePaymentLinkCommand,
    ) -> Result<CreatePaymentLinkResult, PaymentLinkError> {
        if cmd.amount <= 0 {
            return Err(PaymentLinkError::InvalidAmount(cmd.amount));
        }

        let config = self
            .providers
            .find_by_code(&cmd.provider_code)
            .await
            .map_err(|err| PaymentLinkError::Store(err.to_string()))?
            .ok_or_else(|| PaymentLinkError::ProviderNotConfigured(cmd.provider_code.clone()))?;

        let mut request =
            PaymentRequest::for_order(&cmd.reference, cmd.amount).with_locale(&config.locale);
        if let Some(description) = cmd.description {
            request = request.with_description(description);
        }

        let url = PaymentLinkBuilder::new(config).build(&request)?;

        info!(
            provider = %cmd.provider_code,
            reference = %cmd.reference,
            "payment link created"
        );

        Ok(CreatePaymentLinkResult { payment_url: url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProviderStore;
    use crate::config::ProviderConfig;
    use secrecy::SecretString;

    const PROVIDER: &str = "viettelpay";

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            code: PROVIDER.to_string(),
            merchant_code: "M1".to_string(),
            access_code: "AC1".to_string(),
            hash_secret: SecretString::new("secret".to_string()),
            payment_base_url: "https://sandbox.viettelmoney.vn/PaymentGateway/payment"
                .to_string(),
            return_url: "https://merchant.example.com/payment/viettelpay/return".to_string(),
            locale: "Vi".to_string(),
            allowed_source_ips: "203.0.113.10".to_string(),
        }
    }

    fn handler() -> CreatePaymentLinkHandler {
        CreatePaymentLinkHandler::new(Arc::new(InMemoryProviderStore::with_provider(
            test_config(),
        )))
    }

    fn command(reference: &str, amount: i64) -> CreatePaymentLinkCommand {
        CreatePaymentLinkCommand {
            provider_code: PROVIDER.to_string(),
            reference: reference.to_string(),
            amount,
            description: None,
        }
    }

    #[tokio::test]
    async fn builds_a_signed_url() {
        let result = handler().handle(command("REF1", 10_000)).await.unwrap();

        assert!(result
            .payment_url
            .starts_with("https://sandbox.viettelmoney.vn/PaymentGateway/payment?"));
        assert!(result.payment_url.contains("&check_sum="));
    }

    #[tokio::test]
    async fn identical_commands_yield_identical_urls() {
        let handler = handler();
        let first = handler.handle(command("REF1", 10_000)).await.unwrap();
        let second = handler.handle(command("REF1", 10_000)).await.unwrap();
        assert_eq!(first.payment_url, second.payment_url);
    }

    #[tokio::test]
    async fn description_override_is_used() {
        let result = handler()
            .handle(CreatePaymentLinkCommand {
                description: Some("Order 42".to_string()),
                ..command("REF1", 10_000)
            })
            .await
            .unwrap();

        assert!(result.payment_url.contains("desc=Order+42"));
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let result = handler().handle(command("REF1", 0)).await;
        assert!(matches!(result, Err(PaymentLinkError::InvalidAmount(0))));

        let result = handler().handle(command("REF1", -500)).await;
        assert!(matches!(result, Err(PaymentLinkError::InvalidAmount(-500))));
    }

    #[tokio::test]
    async fn rejects_unknown_provider_code() {
        let result = handler()
            .handle(CreatePaymentLinkCommand {
                provider_code: "other".to_string(),
                ..command("REF1", 10_000)
            })
            .await;

        assert!(matches!(
            result,
            Err(PaymentLinkError::ProviderNotConfigured(code)) if code == "other"
        ));
    }

    #[tokio::test]
    async fn non_ascii_secret_surfaces_as_encoding_error() {
        let mut config = test_config();
        config.hash_secret = SecretString::new("bí mật".to_string());
        let handler = CreatePaymentLinkHandler::new(Arc::new(
            InMemoryProviderStore::with_provider(config),
        ));

        let result = handler.handle(command("REF1", 10_000)).await;
        assert!(matches!(result, Err(PaymentLinkError::Encoding(_))));
    }
}
