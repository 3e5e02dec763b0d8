//! Error types for notification verification and link building.
//!
//! Every webhook failure maps to a distinct gateway acknowledgment code at
//! the HTTP boundary, so the taxonomy mirrors those categories one to one.

use thiserror::Error;

/// A value that must be ASCII for MAC computation but is not.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} is not ASCII-encodable")]
pub struct EncodingError(pub &'static str);

/// Failures while authenticating or reconciling an inbound notification.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Source address is not on the provider allow-list.
    #[error("Notification from unauthorized source address")]
    UnauthorizedSource,

    /// Payload is empty or missing a required field.
    #[error("Malformed notification: {0}")]
    MalformedNotification(&'static str),

    /// Recomputed MAC does not match the received signature.
    #[error("Received data with invalid signature")]
    InvalidSignature,

    /// Notified amount disagrees with the stored transaction amount.
    #[error("Notification amount {received} does not match transaction amount {expected}")]
    AmountMismatch { expected: i64, received: i64 },

    /// No transaction matches the notified reference.
    #[error("Transaction not found for reference: {0}")]
    TransactionNotFound(String),

    /// A collaborator store failed; the only retryable category.
    #[error("Store error: {0}")]
    Store(String),
}

impl WebhookError {
    /// True if the gateway should redeliver this notification later.
    ///
    /// Verification and reconciliation failures are final for a given
    /// payload; only infrastructure faults can succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Store(_))
    }
}

/// Failures while building a signed payment-initiation URL.
#[derive(Debug, Error)]
pub enum PaymentLinkError {
    /// Secret or checksum input fell outside ASCII; a configuration fault.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Requested amount is not a positive minor-unit value.
    #[error("Invalid payment amount: {0}")]
    InvalidAmount(i64),

    /// No provider configuration is registered under this code.
    #[error("No payment provider configured for code: {0}")]
    ProviderNotConfigured(String),

    /// A collaborator store failed.
    #[error("Store error: {0}")]
    Store(String),
}
