use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::enums::Chain;
use crate::error::{ AppError, Result };
use crate::providers::{ TransactionApi, TransactionApiResolver };
use crate::tx_service::HttpTransactionApi;

/// Hands out one cached `HttpTransactionApi` per configured chain.
pub struct TransactionApiManager {
    config: Arc<Config>,
    client: reqwest::Client,
    apis: Arc<RwLock<HashMap<Chain, Arc<HttpTransactionApi>>>>,
}

impl TransactionApiManager {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = reqwest::Client
            ::builder()
            .timeout(config.tx_service_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            apis: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    fn resolve_chain(chain_id: &str) -> Result<Chain> {
        Chain::from_canonical_id(chain_id).ok_or_else(|| AppError::UnknownChain(chain_id.to_string()))
    }

    pub async fn get_api(&self, chain_id: &str) -> Result<Arc<HttpTransactionApi>> {
        let chain = Self::resolve_chain(chain_id)?;

        if let Some(api) = self.apis.read().await.get(&chain) {
            return Ok(api.clone());
        }

        let chain_config = self.config
            .get_chain_config(chain)
            .ok_or_else(|| AppError::UnknownChain(chain_id.to_string()))?;

        let mut apis = self.apis.write().await;
        // Another caller may have built it while we waited for the lock
        let api = apis
            .entry(chain)
            .or_insert_with(|| {
                tracing::info!(
                    "Creating {} transaction API at {}",
                    chain.display_name(),
                    chain_config.transaction_service_url
                );
                Arc::new(
                    HttpTransactionApi::new(
                        chain,
                        &chain_config.transaction_service_url,
                        self.config.tx_service_api_key.clone(),
                        self.client.clone()
                    )
                )
            })
            .clone();

        Ok(api)
    }

    /// Drop the cached client for a chain so the next lookup rebuilds it.
    pub async fn evict_transaction_api(&self, chain_id: &str) -> Result<()> {
        let chain = Self::resolve_chain(chain_id)?;
        if self.apis.write().await.remove(&chain).is_some() {
            tracing::info!("Evicted {} transaction API", chain.display_name());
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionApiResolver for TransactionApiManager {
    async fn get_transaction_api(&self, chain_id: &str) -> Result<Arc<dyn TransactionApi>> {
        let api = self.get_api(chain_id).await?;
        Ok(api as Arc<dyn TransactionApi>)
    }
}
