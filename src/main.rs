//! Gateway integration service binary.
//!
//! Loads configuration from the environment, wires the in-memory store
//! adapters around the configured provider and serves the webhook and
//! checkout endpoints. Production deployments embed the library and
//! supply adapters over their own stores instead.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use viettelpay_gateway::adapters::{
    payment_router, InMemoryProviderStore, InMemoryTransactionStore, PaymentAppState,
};
use viettelpay_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let state = PaymentAppState {
        providers: Arc::new(InMemoryProviderStore::with_provider(config.provider.clone())),
        transactions: Arc::new(InMemoryTransactionStore::new()),
    };

    let app = payment_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "gateway integration service listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
