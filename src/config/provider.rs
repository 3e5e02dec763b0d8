//! Payment provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Gateway provider configuration.
///
/// Immutable per provider; resolved once per request through the provider
/// store. The hash secret is wrapped in [`SecretString`] so it never
/// appears in debug output or logs.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Provider code this configuration is registered under.
    #[serde(default = "default_provider_code")]
    pub code: String,

    /// Merchant code assigned by the gateway.
    pub merchant_code: String,

    /// Access code assigned by the gateway.
    pub access_code: String,

    /// Shared MAC secret; never logged.
    pub hash_secret: SecretString,

    /// Base URL of the gateway's hosted payment page.
    pub payment_base_url: String,

    /// URL the gateway redirects the customer to after checkout.
    pub return_url: String,

    /// Checkout page locale.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Semicolon-separated allow-list of notification source addresses.
    pub allowed_source_ips: String,
}

impl ProviderConfig {
    /// Parses the allow-list into individual addresses.
    ///
    /// Whitespace is stripped and empty entries are dropped, so both
    /// `"a;b"` and `"a; b;"` parse to the same list.
    pub fn allowed_source_list(&self) -> Vec<String> {
        self.allowed_source_ips
            .replace(' ', "")
            .split(';')
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether a notification source address is allow-listed.
    pub fn allows_source(&self, address: &str) -> bool {
        self.allowed_source_list()
            .iter()
            .any(|allowed| allowed == address)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_code.is_empty() {
            return Err(ValidationError::MissingRequired("PROVIDER_MERCHANT_CODE"));
        }
        if self.access_code.is_empty() {
            return Err(ValidationError::MissingRequired("PROVIDER_ACCESS_CODE"));
        }
        if self.hash_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PROVIDER_HASH_SECRET"));
        }
        if self.allowed_source_list().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PROVIDER_ALLOWED_SOURCE_IPS",
            ));
        }

        if !self.payment_base_url.starts_with("http://")
            && !self.payment_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidPaymentBaseUrl);
        }
        if !self.return_url.starts_with("http://") && !self.return_url.starts_with("https://") {
            return Err(ValidationError::InvalidReturnUrl);
        }

        Ok(())
    }
}

fn default_provider_code() -> String {
    "viettelpay".to_string()
}

fn default_locale() -> String {
    "Vi".to_string()
}
