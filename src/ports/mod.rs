//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProviderStore` - per-provider gateway configuration lookup
//! - `TransactionStore` - externally owned transaction records with
//!   atomic state-transition operations

mod provider_store;
mod transaction_store;

pub use provider_store::ProviderStore;
pub use transaction_store::{StoreError, TransactionRecord, TransactionStore, TransitionResult};
