//! Payment handlers.
//!
//! Command handlers for the two gateway operations:
//!
//! - Processing inbound payment notifications (verify + reconcile)
//! - Building signed payment-initiation links

mod create_payment_link;
mod process_notification;

pub use create_payment_link::{
    CreatePaymentLinkCommand, CreatePaymentLinkHandler, CreatePaymentLinkResult,
};
pub use process_notification::{
    ProcessNotificationCommand, ProcessNotificationHandler, ProcessNotificationResult,
};
