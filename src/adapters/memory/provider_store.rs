//! In-Memory Provider Store Adapter
//!
//! Serves provider configuration from memory, keyed by provider code.
//! Useful for testing and the sandbox binary, where the single provider
//! comes straight from the environment configuration.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ProviderConfig;
use crate::ports::{ProviderStore, StoreError};

/// In-memory provider configuration store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderStore {
    providers: Arc<RwLock<HashMap<String, ProviderConfig>>>,
}

impl InMemoryProviderStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single provider, keyed by its code
    pub fn with_provider(config: ProviderConfig) -> Self {
        let mut providers = HashMap::new();
        providers.insert(config.code.clone(), config);
        Self {
            providers: Arc::new(RwLock::new(providers)),
        }
    }

    /// Register or replace a provider
    pub async fn register(&self, config: ProviderConfig) {
        self.providers
            .write()
            .await
            .insert(config.code.clone(), config);
    }
}

#[async_trait]
impl ProviderStore for InMemoryProviderStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<ProviderConfig>, StoreError> {
        let providers = self.providers.read().await;
        Ok(providers.get(code).cloned())
    }
}
