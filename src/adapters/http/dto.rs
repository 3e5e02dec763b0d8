//! HTTP DTOs (Data Transfer Objects) for the payment endpoints.
//!
//! These types define the JSON boundary with the gateway and with
//! checkout callers. Acknowledgment codes are part of the gateway
//! contract: each failure category keeps a stable, distinct code so the
//! gateway's retry and alerting logic can tell them apart.

use serde::{Deserialize, Serialize};

use crate::domain::gateway::WebhookError;

// ════════════════════════════════════════════════════════════════════════════════
// Webhook acknowledgment
// ════════════════════════════════════════════════════════════════════════════════

/// JSON acknowledgment returned to the gateway for every notification.
///
/// Always delivered with HTTP 200; the gateway keys its behavior off
/// `RspCode` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Stable acknowledgment code.
    #[serde(rename = "RspCode")]
    pub rsp_code: String,

    /// Human-readable companion message.
    #[serde(rename = "Message")]
    pub message: String,
}

impl WebhookAck {
    fn new(rsp_code: &str, message: &str) -> Self {
        Self {
            rsp_code: rsp_code.to_string(),
            message: message.to_string(),
        }
    }

    /// `00` - notification verified and reconciled.
    pub fn confirm_success() -> Self {
        Self::new("00", "Confirm Success")
    }

    /// `02` - transaction was already finalized.
    pub fn already_confirmed() -> Self {
        Self::new("02", "Order already confirmed")
    }

    /// `01` - no transaction matches the notified reference.
    pub fn order_not_found() -> Self {
        Self::new("01", "Order Not Found")
    }

    /// `04` - notified amount disagrees with the stored amount.
    pub fn invalid_amount() -> Self {
        Self::new("04", "Invalid amount")
    }

    /// `97` - signature verification failed.
    pub fn invalid_checksum() -> Self {
        Self::new("97", "Invalid Checksum")
    }

    /// `91` - payload empty or missing required fields.
    pub fn invalid_data() -> Self {
        Self::new("91", "Invalid Data")
    }

    /// `99` - unauthorized source or internal fault; deliberately generic.
    pub fn unknown_error() -> Self {
        Self::new("99", "Unknown error")
    }
}

impl From<&WebhookError> for WebhookAck {
    fn from(err: &WebhookError) -> Self {
        match err {
            WebhookError::UnauthorizedSource => Self::unknown_error(),
            WebhookError::MalformedNotification(_) => Self::invalid_data(),
            WebhookError::InvalidSignature => Self::invalid_checksum(),
            WebhookError::AmountMismatch { .. } => Self::invalid_amount(),
            WebhookError::TransactionNotFound(_) => Self::order_not_found(),
            WebhookError::Store(_) => Self::unknown_error(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout
// ════════════════════════════════════════════════════════════════════════════════

/// Request to build a signed payment link for a pending order.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Merchant reference of the order.
    pub reference: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Optional description override.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response carrying the signed redirect URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// The complete, signed payment-initiation URL.
    pub payment_url: String,
}

/// Standard error body for checkout failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
