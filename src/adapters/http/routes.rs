//! Axum router configuration for the payment endpoints.
//!
//! This module defines the route structure for the gateway integration
//! and wires the routes to their handlers.

use axum::{routing::post, Router};

use super::handlers::{create_checkout_link, handle_gateway_webhook, PaymentAppState};

/// Create the payment API router.
///
/// # Routes
///
/// ## Checkout Endpoints
/// - `POST /checkout` - Build a signed payment-initiation URL
///
/// ## Webhook Endpoints (no auth; source allow-list + MAC verified)
/// - `POST /webhook` - Consume a gateway payment notification
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/checkout", post(create_checkout_link))
        .route("/webhook", post(handle_gateway_webhook))
}

/// Create the complete payment module router.
///
/// Mounts the payment routes under the provider's path prefix, suitable
/// for merging into the host application router.
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new().nest("/payment/viettelpay", payment_routes())
}
