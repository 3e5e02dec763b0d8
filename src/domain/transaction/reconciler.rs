//! Transaction reconciliation against verified notifications.
//!
//! Maps a MAC-verified notification to its pending transaction and applies
//! the response-code-driven state transition. Reconciliation is idempotent:
//! a transaction already in a terminal state yields a duplicate outcome and
//! never re-triggers side effects.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::gateway::{GatewayResponseCode, NotificationPayload, WebhookError};
use crate::ports::{StoreError, TransactionStore, TransitionResult};

use super::state::TransactionState;

/// Message recorded when the customer cancels at the gateway.
const CANCELLED_MESSAGE: &str = "The customer cancelled the payment.";

/// Outcome of reconciling one verified notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The transition was applied; the transaction is now in this state.
    Applied(TransactionState),
    /// The transaction was already finalized; nothing was mutated.
    Duplicate(TransactionState),
}

/// Applies verified notifications to externally owned transactions.
pub struct TransactionReconciler {
    transactions: Arc<dyn TransactionStore>,
}

impl TransactionReconciler {
    /// Creates a reconciler over the given transaction store.
    pub fn new(transactions: Arc<dyn TransactionStore>) -> Self {
        Self { transactions }
    }

    /// Reconciles one verified notification.
    ///
    /// # Steps
    ///
    /// 1. Extract the merchant reference (`order_id`)
    /// 2. Look up the transaction by (provider code, reference)
    /// 3. Short-circuit with a duplicate outcome if already terminal
    /// 4. Check the notified amount against the stored amount
    /// 5. Apply the response-code-driven transition through the store's
    ///    atomic conditional update
    ///
    /// A transition that loses the race against a concurrent notification
    /// observes the winner's terminal state and also reports a duplicate.
    ///
    /// # Errors
    ///
    /// - `MalformedNotification` - reference missing or amount unparsable
    /// - `TransactionNotFound` - no transaction matches the reference
    /// - `AmountMismatch` - notified amount differs from the stored amount
    /// - `Store` - the transaction store failed
    pub async fn reconcile(
        &self,
        provider_code: &str,
        payload: &NotificationPayload,
    ) -> Result<ReconcileOutcome, WebhookError> {
        // 1. Reference
        let reference = payload
            .order_id()
            .ok_or(WebhookError::MalformedNotification("missing order_id"))?;

        // 2. Lookup
        let record = self
            .transactions
            .find(provider_code, reference)
            .await
            .map_err(store_error)?
            .ok_or_else(|| WebhookError::TransactionNotFound(reference.to_string()))?;

        // 3. Idempotency short-circuit
        if record.state.is_terminal() {
            warn!(
                %reference,
                state = %record.state,
                "notification for already processed transaction"
            );
            return Ok(ReconcileOutcome::Duplicate(record.state));
        }

        // 4. Amount consistency, when the notification carries one
        if let Some(raw_amount) = payload.trans_amount() {
            let received: i64 = raw_amount
                .parse()
                .map_err(|_| WebhookError::MalformedNotification("unparsable trans_amount"))?;
            if received != record.amount {
                return Err(WebhookError::AmountMismatch {
                    expected: record.amount,
                    received,
                });
            }
        }

        // 5. Response-code dispatch
        let code = GatewayResponseCode::from_code(payload.response_code().unwrap_or(""));
        let result = match &code {
            GatewayResponseCode::Success => {
                info!(%reference, "successful payment notification, completing transaction");
                self.transactions
                    .set_done(provider_code, reference, reference)
                    .await
            }
            GatewayResponseCode::CustomerCancelled => {
                warn!(%reference, "cancelled payment notification");
                self.transactions
                    .set_cancelled(provider_code, reference, CANCELLED_MESSAGE)
                    .await
            }
            GatewayResponseCode::Unknown(unknown) => {
                warn!(
                    %reference,
                    response_code = %unknown,
                    "payment notification with invalid response code"
                );
                let message =
                    format!("Received data with invalid response code: {unknown}");
                self.transactions
                    .set_error(provider_code, reference, &message)
                    .await
            }
        };

        match result.map_err(store_error)? {
            TransitionResult::Applied(state) => Ok(ReconcileOutcome::Applied(state)),
            TransitionResult::AlreadyFinal(state) => Ok(ReconcileOutcome::Duplicate(state)),
            TransitionResult::NotFound => {
                Err(WebhookError::TransactionNotFound(reference.to_string()))
            }
        }
    }
}

fn store_error(err: StoreError) -> WebhookError {
    WebhookError::Store(err.to_string())
}
