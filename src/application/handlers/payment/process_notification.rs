//! ProcessNotificationHandler - Command handler for inbound gateway
//! notifications.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::gateway::{NotificationPayload, NotificationVerifier, WebhookError};
use crate::domain::transaction::{ReconcileOutcome, TransactionReconciler, TransactionState};
use crate::ports::{ProviderStore, TransactionStore};

/// Command to process one inbound payment notification.
#[derive(Debug, Clone)]
pub struct ProcessNotificationCommand {
    /// Provider code the webhook endpoint is registered under.
    pub provider_code: String,
    /// Source address the notification arrived from.
    pub source_address: String,
    /// Decoded notification fields.
    pub payload: NotificationPayload,
}

/// Result of successful notification processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessNotificationResult {
    /// Verification passed and a state transition was applied.
    Reconciled(TransactionState),
    /// The transaction was already finalized; nothing changed.
    Duplicate(TransactionState),
}

/// Handler for inbound gateway notifications.
///
/// Orchestrates verification and reconciliation, and records the error
/// state on the matched transaction when a security or amount check fails.
pub struct ProcessNotificationHandler {
    providers: Arc<dyn ProviderStore>,
    transactions: Arc<dyn TransactionStore>,
}

impl ProcessNotificationHandler {
    pub fn new(
        providers: Arc<dyn ProviderStore>,
        transactions: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            providers,
            transactions,
        }
    }

    /// Processes one notification end to end.
    ///
    /// Signature and amount failures additionally force the matched
    /// transaction (when resolvable) into the error state with a
    /// descriptive message; malformed and not-found failures touch no
    /// transaction.
    pub async fn handle(
        &self,
        cmd: ProcessNotificationCommand,
    ) -> Result<ProcessNotificationResult, WebhookError> {
        // 1. Resolve provider configuration
        let config = self
            .providers
            .find_by_code(&cmd.provider_code)
            .await
            .map_err(|err| WebhookError::Store(err.to_string()))?
            .ok_or_else(|| {
                WebhookError::Store(format!(
                    "no provider configured for code {}",
                    cmd.provider_code
                ))
            })?;

        // 2. Authenticate
        let verifier = NotificationVerifier::new(config);
        match verifier.verify(&cmd.payload, &cmd.source_address) {
            Ok(()) => {}
            Err(err @ WebhookError::InvalidSignature) => {
                self.mark_error(&cmd, "Received data with invalid signature.")
                    .await;
                return Err(err);
            }
            Err(err) => return Err(err),
        }

        // 3. Reconcile
        let reconciler = TransactionReconciler::new(self.transactions.clone());
        match reconciler.reconcile(&cmd.provider_code, &cmd.payload).await {
            Ok(ReconcileOutcome::Applied(state)) => {
                info!(
                    provider = %cmd.provider_code,
                    order_id = cmd.payload.order_id().unwrap_or("<missing>"),
                    %state,
                    "notification reconciled"
                );
                Ok(ProcessNotificationResult::Reconciled(state))
            }
            Ok(ReconcileOutcome::Duplicate(state)) => {
                Ok(ProcessNotificationResult::Duplicate(state))
            }
            Err(err @ WebhookError::AmountMismatch { .. }) => {
                self.mark_error(&cmd, "Received data with invalid amount.")
                    .await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Records an error state on the notified transaction, if resolvable.
    ///
    /// Best effort: a missing reference or store failure leaves the
    /// original error to be reported; the store refuses to overwrite a
    /// terminal state on its own.
    async fn mark_error(&self, cmd: &ProcessNotificationCommand, message: &str) {
        let Some(reference) = cmd.payload.order_id() else {
            return;
        };
        if let Err(err) = self
            .transactions
            .set_error(&cmd.provider_code, reference, message)
            .await
        {
            error!(%reference, error = %err, "failed to record transaction error state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProviderStore, InMemoryTransactionStore};
    use crate::config::ProviderConfig;
    use crate::domain::gateway::notification::SECURE_HASH_FIELD;
    use crate::domain::gateway::{canonical, signing};
    use crate::ports::TransactionRecord;
    use secrecy::SecretString;

    const PROVIDER: &str = "viettelpay";
    const ALLOWED_IP: &str = "203.0.113.10";

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            code: PROVIDER.to_string(),
            merchant_code: "M1".to_string(),
            access_code: "AC1".to_string(),
            hash_secret: SecretString::new("secret".to_string()),
            payment_base_url: "https://sandbox.viettelmoney.vn/PaymentGateway/payment"
                .to_string(),
            return_url: "https://merchant.example.com/payment/viettelpay/return".to_string(),
            locale: "Vi".to_string(),
            allowed_source_ips: ALLOWED_IP.to_string(),
        }
    }

    fn signed_payload(fields: &[(&str, &str)]) -> NotificationPayload {
        let unsigned: NotificationPayload = fields.iter().copied().collect();
        let canonical = canonical::notification_mac_input(&unsigned);
        let signature =
            signing::notification_signature(&test_config().hash_secret, &canonical);
        fields
            .iter()
            .copied()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .chain([(SECURE_HASH_FIELD.to_string(), signature)])
            .collect()
    }

    async fn setup(amount: i64) -> (ProcessNotificationHandler, Arc<InMemoryTransactionStore>) {
        let providers = Arc::new(InMemoryProviderStore::with_provider(test_config()));
        let transactions = Arc::new(InMemoryTransactionStore::new());
        transactions
            .insert(TransactionRecord::pending(PROVIDER, "REF1", amount))
            .await;
        let handler = ProcessNotificationHandler::new(providers, transactions.clone());
        (handler, transactions)
    }

    fn command(payload: NotificationPayload) -> ProcessNotificationCommand {
        ProcessNotificationCommand {
            provider_code: PROVIDER.to_string(),
            source_address: ALLOWED_IP.to_string(),
            payload,
        }
    }

    #[tokio::test]
    async fn valid_success_notification_completes_transaction() {
        let (handler, transactions) = setup(10_000).await;
        let payload = signed_payload(&[
            ("order_id", "REF1"),
            ("trans_amount", "10000"),
            ("viettel_ResponseCode", "00"),
        ]);

        let result = handler.handle(command(payload)).await.unwrap();

        assert_eq!(
            result,
            ProcessNotificationResult::Reconciled(TransactionState::Done)
        );
        let record = transactions.find(PROVIDER, "REF1").await.unwrap().unwrap();
        assert_eq!(record.state, TransactionState::Done);
    }

    #[tokio::test]
    async fn repeated_delivery_reports_duplicate() {
        let (handler, _) = setup(10_000).await;
        let payload = signed_payload(&[
            ("order_id", "REF1"),
            ("trans_amount", "10000"),
            ("viettel_ResponseCode", "00"),
        ]);

        handler.handle(command(payload.clone())).await.unwrap();
        let second = handler.handle(command(payload)).await.unwrap();

        assert_eq!(
            second,
            ProcessNotificationResult::Duplicate(TransactionState::Done)
        );
    }

    #[tokio::test]
    async fn invalid_signature_marks_transaction_errored() {
        let (handler, transactions) = setup(10_000).await;
        let payload: NotificationPayload = [
            ("order_id", "REF1"),
            ("viettel_ResponseCode", "00"),
            (SECURE_HASH_FIELD, "00ff00ff"),
        ]
        .into_iter()
        .collect();

        let result = handler.handle(command(payload)).await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
        let record = transactions.find(PROVIDER, "REF1").await.unwrap().unwrap();
        assert_eq!(record.state, TransactionState::Error);
        assert_eq!(
            record.state_message.as_deref(),
            Some("Received data with invalid signature.")
        );
    }

    #[tokio::test]
    async fn amount_mismatch_marks_transaction_errored() {
        let (handler, transactions) = setup(150_000).await;
        let payload = signed_payload(&[
            ("order_id", "REF1"),
            ("trans_amount", "100000"),
            ("viettel_ResponseCode", "00"),
        ]);

        let result = handler.handle(command(payload)).await;

        assert!(matches!(result, Err(WebhookError::AmountMismatch { .. })));
        let record = transactions.find(PROVIDER, "REF1").await.unwrap().unwrap();
        assert_eq!(record.state, TransactionState::Error);
        assert_eq!(
            record.state_message.as_deref(),
            Some("Received data with invalid amount.")
        );
    }

    #[tokio::test]
    async fn unauthorized_source_touches_no_transaction() {
        let (handler, transactions) = setup(10_000).await;
        let payload = signed_payload(&[("order_id", "REF1"), ("viettel_ResponseCode", "00")]);
        let cmd = ProcessNotificationCommand {
            source_address: "198.51.100.1".to_string(),
            ..command(payload)
        };

        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(WebhookError::UnauthorizedSource)));
        let record = transactions.find(PROVIDER, "REF1").await.unwrap().unwrap();
        assert_eq!(record.state, TransactionState::Pending);
    }

    #[tokio::test]
    async fn signature_failure_for_unknown_reference_is_reported_unchanged() {
        let (handler, _) = setup(10_000).await;
        let payload: NotificationPayload = [
            ("order_id", "MISSING"),
            ("viettel_ResponseCode", "00"),
            (SECURE_HASH_FIELD, "00ff00ff"),
        ]
        .into_iter()
        .collect();

        let result = handler.handle(command(payload)).await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[tokio::test]
    async fn unknown_provider_code_is_a_store_error() {
        let providers = Arc::new(InMemoryProviderStore::new());
        let transactions = Arc::new(InMemoryTransactionStore::new());
        let handler = ProcessNotificationHandler::new(providers, transactions);

        let result = handler
            .handle(command(signed_payload(&[("order_id", "REF1")])))
            .await;

        assert!(matches!(result, Err(WebhookError::Store(_))));
    }
}
