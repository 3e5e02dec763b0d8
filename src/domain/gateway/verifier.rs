//! Inbound notification authentication.
//!
//! Verification is a pure predicate: it checks the source address against
//! the provider allow-list and the received MAC against a recomputed one,
//! and leaves all state mutation to the reconciliation step.

use tracing::warn;

use crate::config::ProviderConfig;

use super::canonical;
use super::errors::WebhookError;
use super::notification::NotificationPayload;
use super::signing;

/// Verifies inbound notifications for one provider.
pub struct NotificationVerifier {
    config: ProviderConfig,
}

impl NotificationVerifier {
    /// Creates a verifier over the given provider configuration.
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Authenticates a notification.
    ///
    /// # Verification Steps
    ///
    /// 1. Source address must be on the provider allow-list
    /// 2. Payload must be non-empty and carry a signature field
    /// 3. Recompute the canonical MAC input and its HMAC-SHA512 signature
    /// 4. Compare against the received signature in constant time
    ///
    /// # Errors
    ///
    /// - `UnauthorizedSource` - source address is not allow-listed
    /// - `MalformedNotification` - empty payload or missing signature
    /// - `InvalidSignature` - recomputed MAC does not match
    pub fn verify(
        &self,
        payload: &NotificationPayload,
        source_address: &str,
    ) -> Result<(), WebhookError> {
        // 1. Allow-list check; the response stays generic so the list
        //    contents are never leaked to the caller.
        if !self.config.allows_source(source_address) {
            warn!(%source_address, "notification from unauthorized source address");
            return Err(WebhookError::UnauthorizedSource);
        }

        // 2. Structural checks
        if payload.is_empty() {
            return Err(WebhookError::MalformedNotification("empty notification"));
        }
        let received = payload
            .signature()
            .ok_or(WebhookError::MalformedNotification("missing signature field"))?;

        // 3 + 4. Recompute and compare
        let canonical = canonical::notification_mac_input(payload);
        if !signing::verify_notification_signature(&self.config.hash_secret, &canonical, received)
        {
            warn!(
                order_id = payload.order_id().unwrap_or("<missing>"),
                "notification signature mismatch"
            );
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }
}
