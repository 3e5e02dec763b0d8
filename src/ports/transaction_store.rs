//! TransactionStore port - capability contract for the external
//! transaction store.
//!
//! The store owns persistence and mutual exclusion: every `set_*`
//! operation is an atomic conditional update that refuses to leave a
//! terminal state. Two concurrent notifications for the same reference
//! therefore apply at most one transition; the loser observes
//! `AlreadyFinal` and reports a duplicate.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transaction::TransactionState;

/// Infrastructure failure raised by a store adapter.
#[derive(Debug, Error)]
#[error("store unavailable: {0}")]
pub struct StoreError(pub String);

/// Snapshot of an externally owned transaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Merchant reference; unique per provider, immutable once created.
    pub reference: String,
    /// Provider this transaction belongs to.
    pub provider_code: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Current lifecycle state.
    pub state: TransactionState,
    /// Gateway-side reference, recorded on successful payment.
    pub provider_reference: Option<String>,
    /// Operator-facing message recorded with the last transition.
    pub state_message: Option<String>,
}

impl TransactionRecord {
    /// Creates a pending record awaiting its payment notification.
    pub fn pending(
        provider_code: impl Into<String>,
        reference: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            reference: reference.into(),
            provider_code: provider_code.into(),
            amount,
            state: TransactionState::Pending,
            provider_reference: None,
            state_message: None,
        }
    }
}

/// Outcome of an atomic state-transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionResult {
    /// The transition was applied; the record is now in this state.
    Applied(TransactionState),
    /// The record was already in this terminal state; nothing changed.
    AlreadyFinal(TransactionState),
    /// No record matches the given reference.
    NotFound,
}

/// Port over the externally owned transaction store.
///
/// Implementations must make each transition individually atomic (a
/// compare-and-swap on state or a per-reference lock); the core never
/// performs its own locking.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Looks up a transaction by provider code and merchant reference.
    async fn find(
        &self,
        provider_code: &str,
        reference: &str,
    ) -> Result<Option<TransactionRecord>, StoreError>;

    /// Transitions a pending transaction to `Done`, recording the
    /// gateway's reference.
    async fn set_done(
        &self,
        provider_code: &str,
        reference: &str,
        provider_reference: &str,
    ) -> Result<TransitionResult, StoreError>;

    /// Transitions a pending transaction to `Cancelled` with a message.
    async fn set_cancelled(
        &self,
        provider_code: &str,
        reference: &str,
        message: &str,
    ) -> Result<TransitionResult, StoreError>;

    /// Transitions a pending transaction to `Error` with a message.
    async fn set_error(
        &self,
        provider_code: &str,
        reference: &str,
        message: &str,
    ) -> Result<TransitionResult, StoreError>;
}
