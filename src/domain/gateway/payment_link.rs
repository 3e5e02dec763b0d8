//! Signed payment-initiation URL construction.
//!
//! The checksum is computed strictly before serialization and covers only
//! the fixed field order; the final URL is fully deterministic for
//! identical configuration and request.

use crate::config::ProviderConfig;

use super::canonical::{self, PaymentLinkFields};
use super::errors::PaymentLinkError;
use super::signing;

/// Protocol version sent with every payment request.
pub const PROTOCOL_VERSION: &str = "2.0";

/// Gateway command for payment initiation.
pub const PAYMENT_COMMAND: &str = "PAYMENT";

/// Query parameter carrying the computed checksum.
pub const CHECKSUM_FIELD: &str = "check_sum";

/// Default locale for the hosted checkout page.
pub const DEFAULT_LOCALE: &str = "Vi";

/// One outbound payment request; built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Merchant reference, correlating the later notification back to us.
    pub order_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Gateway bill code; defaults to the merchant reference.
    pub bill_code: String,
    /// Order description shown on the checkout page.
    pub description: String,
    /// Checkout page locale.
    pub locale: String,
}

impl PaymentRequest {
    /// Builds a request for an order with the conventional defaults: the
    /// bill code mirrors the reference and the description names the order.
    pub fn for_order(reference: impl Into<String>, amount: i64) -> Self {
        let reference = reference.into();
        Self {
            bill_code: reference.clone(),
            description: format!("Thanh toán đơn hàng {reference}"),
            order_id: reference,
            amount,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Replaces the default description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the default locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Builds signed redirect URLs for one provider.
pub struct PaymentLinkBuilder {
    config: ProviderConfig,
}

impl PaymentLinkBuilder {
    /// Creates a builder over the given provider configuration.
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Assembles the full signed payment URL.
    ///
    /// The checksum covers access code, bill code, command, merchant code,
    /// order id, amount and version in that fixed order; the merchant code
    /// always comes from provider configuration. All request parameters are
    /// then serialized as a sorted-by-key form-encoded query with
    /// `check_sum` appended last.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentLinkError::Encoding`] if the secret or checksum
    /// input is not ASCII; this is a configuration fault and must surface
    /// to the caller rather than be retried.
    pub fn build(&self, request: &PaymentRequest) -> Result<String, PaymentLinkError> {
        let trans_amount = request.amount.to_string();

        let checksum_input = canonical::payment_mac_input(&PaymentLinkFields {
            access_code: &self.config.access_code,
            bill_code: &request.bill_code,
            command: PAYMENT_COMMAND,
            merchant_code: &self.config.merchant_code,
            order_id: &request.order_id,
            trans_amount: &trans_amount,
            version: PROTOCOL_VERSION,
        });
        let checksum = signing::payment_link_checksum(&self.config.hash_secret, &checksum_input)?;

        // Already in ascending key order.
        let parameters = [
            ("billcode", request.bill_code.as_str()),
            ("command", PAYMENT_COMMAND),
            ("desc", request.description.as_str()),
            ("locale", request.locale.as_str()),
            ("merchant_code", self.config.merchant_code.as_str()),
            ("order_id", request.order_id.as_str()),
            ("return_url", self.config.return_url.as_str()),
            ("trans_amount", trans_amount.as_str()),
            ("version", PROTOCOL_VERSION),
        ];

        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in parameters {
            query.append_pair(key, value);
        }
        let query = query.finish();

        // The checksum value is form-encoded by the signing scheme itself
        // and is appended verbatim as the final parameter.
        Ok(format!(
            "{}?{}&{}={}",
            self.config.payment_base_url, query, CHECKSUM_FIELD, checksum
        ))
    }
}
