//! HTTP adapters - gateway-facing REST endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export key types for convenience
pub use handlers::PaymentAppState;
pub use routes::payment_router;
