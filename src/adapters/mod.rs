//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum endpoints for the webhook and checkout flows
//! - `memory` - in-memory stores for tests and the sandbox binary

pub mod http;
pub mod memory;

pub use http::{payment_router, PaymentAppState};
pub use memory::{InMemoryProviderStore, InMemoryTransactionStore};
