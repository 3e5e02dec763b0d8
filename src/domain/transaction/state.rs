//! Transaction state machine.
//!
//! A transaction leaves `Pending` exactly once, into one of three terminal
//! states; no transition ever leaves a terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a payment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    /// Awaiting the gateway's payment notification.
    Pending,

    /// Payment confirmed by the gateway.
    Done,

    /// Customer cancelled the payment at the gateway.
    Cancelled,

    /// Verification or reconciliation failed; details in the state message.
    Error,
}

impl TransactionState {
    /// Returns true once the transaction has reached a final state.
    ///
    /// Notifications arriving for a terminal transaction are duplicates
    /// and must never re-trigger side effects.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionState::Pending)
    }

    /// Whether a transition from this state to `target` is permitted.
    pub fn can_transition_to(&self, target: TransactionState) -> bool {
        matches!(self, TransactionState::Pending) && target.is_terminal()
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionState::Pending => "pending",
            TransactionState::Done => "done",
            TransactionState::Cancelled => "cancelled",
            TransactionState::Error => "error",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_non_terminal_state() {
        assert!(!TransactionState::Pending.is_terminal());
        assert!(TransactionState::Done.is_terminal());
        assert!(TransactionState::Cancelled.is_terminal());
        assert!(TransactionState::Error.is_terminal());
    }

    #[test]
    fn pending_can_reach_every_terminal_state() {
        let pending = TransactionState::Pending;
        assert!(pending.can_transition_to(TransactionState::Done));
        assert!(pending.can_transition_to(TransactionState::Cancelled));
        assert!(pending.can_transition_to(TransactionState::Error));
    }

    #[test]
    fn pending_cannot_transition_to_itself() {
        assert!(!TransactionState::Pending.can_transition_to(TransactionState::Pending));
    }

    #[test]
    fn no_transition_leaves_a_terminal_state() {
        let targets = [
            TransactionState::Pending,
            TransactionState::Done,
            TransactionState::Cancelled,
            TransactionState::Error,
        ];
        for source in [
            TransactionState::Done,
            TransactionState::Cancelled,
            TransactionState::Error,
        ] {
            for target in targets {
                assert!(!source.can_transition_to(target));
            }
        }
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(TransactionState::Pending.to_string(), "pending");
        assert_eq!(TransactionState::Done.to_string(), "done");
        assert_eq!(TransactionState::Cancelled.to_string(), "cancelled");
        assert_eq!(TransactionState::Error.to_string(), "error");
    }
}
