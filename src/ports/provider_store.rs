//! ProviderStore port - lookup of per-provider gateway configuration.

use async_trait::async_trait;

use crate::config::ProviderConfig;

use super::transaction_store::StoreError;

/// Port over the external provider-configuration store.
#[async_trait]
pub trait ProviderStore: Send + Sync {
    /// Resolves the configuration registered under a provider code.
    ///
    /// Returns `None` when no provider is configured for the code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ProviderConfig>, StoreError>;
}
