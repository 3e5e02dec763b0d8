//! HTTP handlers for the payment endpoints.
//!
//! These handlers connect Axum routes to the application layer command
//! handlers. The webhook handler never fails at the HTTP level: every
//! outcome, including verification failures, is converted into a
//! gateway acknowledgment delivered with HTTP 200.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Form, Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::warn;

use crate::application::handlers::payment::{
    CreatePaymentLinkCommand, CreatePaymentLinkHandler, ProcessNotificationCommand,
    ProcessNotificationHandler, ProcessNotificationResult,
};
use crate::domain::gateway::{NotificationPayload, PaymentLinkError};
use crate::ports::{ProviderStore, TransactionStore};

use super::dto::{CheckoutRequest, CheckoutResponse, ErrorResponse, WebhookAck};

/// Provider code the mounted routes serve.
pub const PROVIDER_CODE: &str = "viettelpay";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped ports.
#[derive(Clone)]
pub struct PaymentAppState {
    pub providers: Arc<dyn ProviderStore>,
    pub transactions: Arc<dyn TransactionStore>,
}

impl PaymentAppState {
    /// Create handlers on demand from the shared state.
    pub fn notification_handler(&self) -> ProcessNotificationHandler {
        ProcessNotificationHandler::new(self.providers.clone(), self.transactions.clone())
    }

    pub fn payment_link_handler(&self) -> CreatePaymentLinkHandler {
        CreatePaymentLinkHandler::new(self.providers.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /payment/viettelpay/webhook - consume a gateway notification
///
/// Always answers HTTP 200 with a `{"RspCode", "Message"}` body; the
/// gateway keys redelivery and alerting off the code, not the HTTP status.
pub async fn handle_gateway_webhook(
    State(state): State<PaymentAppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Json<WebhookAck> {
    let cmd = ProcessNotificationCommand {
        provider_code: PROVIDER_CODE.to_string(),
        source_address: addr.ip().to_string(),
        payload: NotificationPayload::from_fields(fields),
    };

    let ack = match state.notification_handler().handle(cmd).await {
        Ok(ProcessNotificationResult::Reconciled(_)) => WebhookAck::confirm_success(),
        Ok(ProcessNotificationResult::Duplicate(_)) => WebhookAck::already_confirmed(),
        Err(err) => {
            warn!(error = %err, "webhook rejected");
            WebhookAck::from(&err)
        }
    };

    Json(ack)
}

/// POST /payment/viettelpay/checkout - build a signed payment link
pub async fn create_checkout_link(
    State(state): State<PaymentAppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let cmd = CreatePaymentLinkCommand {
        provider_code: PROVIDER_CODE.to_string(),
        reference: request.reference,
        amount: request.amount,
        description: request.description,
    };

    let result = state.payment_link_handler().handle(cmd).await?;

    Ok(Json(CheckoutResponse {
        payment_url: result.payment_url,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout failures to HTTP responses.
pub struct PaymentApiError(PaymentLinkError);

impl From<PaymentLinkError> for PaymentApiError {
    fn from(err: PaymentLinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            PaymentLinkError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            // A non-ASCII secret is an operator configuration fault, not
            // something the caller can correct or retry.
            PaymentLinkError::Encoding(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_MISCONFIGURED")
            }
            PaymentLinkError::ProviderNotConfigured(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_NOT_CONFIGURED")
            }
            PaymentLinkError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse::new(code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
