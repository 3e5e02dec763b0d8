//! Gateway protocol layer: canonicalization, MAC schemes, notification
//! authentication and signed payment-link construction.

pub mod canonical;
pub mod errors;
pub mod notification;
pub mod payment_link;
pub mod signing;
pub mod verifier;

pub use errors::{EncodingError, PaymentLinkError, WebhookError};
pub use notification::{GatewayResponseCode, NotificationPayload};
pub use payment_link::{PaymentLinkBuilder, PaymentRequest};
pub use verifier::NotificationVerifier;
