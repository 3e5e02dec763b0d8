//! In-Memory Transaction Store Adapter
//!
//! Holds transaction records behind a `tokio::sync::RwLock`. Each state
//! transition runs its read-check-write under the write lock, which gives
//! the atomic conditional update the reconciler relies on. Useful for
//! testing and the sandbox binary.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::transaction::TransactionState;
use crate::ports::{StoreError, TransactionRecord, TransactionStore, TransitionResult};

/// In-memory transaction store keyed by (provider code, reference).
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    records: Arc<RwLock<HashMap<(String, String), TransactionRecord>>>,
    transitions: Arc<RwLock<u64>>,
}

impl InMemoryTransactionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record (test and sandbox seeding)
    pub async fn insert(&self, record: TransactionRecord) {
        let key = (record.provider_code.clone(), record.reference.clone());
        self.records.write().await.insert(key, record);
    }

    /// Number of applied transitions across all records (useful for tests)
    pub async fn transition_count(&self) -> u64 {
        *self.transitions.read().await
    }

    async fn transition(
        &self,
        provider_code: &str,
        reference: &str,
        apply: impl FnOnce(&mut TransactionRecord),
    ) -> Result<TransitionResult, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&(provider_code.to_string(), reference.to_string()))
        else {
            return Ok(TransitionResult::NotFound);
        };

        if record.state.is_terminal() {
            return Ok(TransitionResult::AlreadyFinal(record.state));
        }

        apply(record);
        *self.transitions.write().await += 1;
        Ok(TransitionResult::Applied(record.state))
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn find(
        &self,
        provider_code: &str,
        reference: &str,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(&(provider_code.to_string(), reference.to_string()))
            .cloned())
    }

    async fn set_done(
        &self,
        provider_code: &str,
        reference: &str,
        provider_reference: &str,
    ) -> Result<TransitionResult, StoreError> {
        self.transition(provider_code, reference, |record| {
            record.state = TransactionState::Done;
            record.provider_reference = Some(provider_reference.to_string());
        })
        .await
    }

    async fn set_cancelled(
        &self,
        provider_code: &str,
        reference: &str,
        message: &str,
    ) -> Result<TransitionResult, StoreError> {
        self.transition(provider_code, reference, |record| {
            record.state = TransactionState::Cancelled;
            record.state_message = Some(message.to_string());
        })
        .await
    }

    async fn set_error(
        &self,
        provider_code: &str,
        reference: &str,
        message: &str,
    ) -> Result<TransitionResult, StoreError> {
        self.transition(provider_code, reference, |record| {
            record.state = TransactionState::Error;
            record.state_message = Some(message.to_string());
        })
        .await
    }
}
