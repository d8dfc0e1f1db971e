use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::enums::Chain;

const DEFAULT_TX_SERVICE_TIMEOUT_SECS: u64 = 10;

/// Per-chain configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain: Chain,
    pub transaction_service_url: String,
}

impl ChainConfig {
    pub fn new(chain: Chain, transaction_service_url: &str) -> Self {
        Self {
            chain,
            transaction_service_url: transaction_service_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chain_configs: HashMap<Chain, ChainConfig>,
    pub tx_service_api_key: Option<String>,
    pub tx_service_timeout: Duration,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(
        get: impl Fn(&str) -> Option<String>
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let enabled = match get("TX_SERVICE_CHAINS") {
            Some(val) => Self::parse_chains(&val)?,
            None => Chain::all().to_vec(),
        };

        // Every enabled chain gets a service, overridable per chain
        let mut chain_configs = HashMap::new();

        for chain in enabled {
            let url_key = format!("{}_TX_SERVICE_URL", chain.as_str());
            let url = get(&url_key).unwrap_or_else(||
                chain.default_transaction_service_url().to_string()
            );

            if url.trim().is_empty() {
                return Err(format!("{} cannot be empty", url_key).into());
            }

            chain_configs.insert(chain, ChainConfig::new(chain, url.trim()));
        }

        if chain_configs.is_empty() {
            return Err("No chains enabled. Check TX_SERVICE_CHAINS.".into());
        }

        let tx_service_api_key = get("TX_SERVICE_API_KEY").filter(|k| !k.is_empty());

        let timeout_secs: u64 = get("TX_SERVICE_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_TX_SERVICE_TIMEOUT_SECS.to_string())
            .parse()?;

        let server_host = get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = get("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()?;

        Ok(Config {
            chain_configs,
            tx_service_api_key,
            tx_service_timeout: Duration::from_secs(timeout_secs),
            server_host,
            server_port,
        })
    }

    /// Config for a fixed set of chains, everything else defaulted.
    pub fn with_chains(chain_configs: Vec<ChainConfig>) -> Self {
        Self {
            chain_configs: chain_configs
                .into_iter()
                .map(|cc| (cc.chain, cc))
                .collect(),
            tx_service_api_key: None,
            tx_service_timeout: Duration::from_secs(DEFAULT_TX_SERVICE_TIMEOUT_SECS),
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
        }
    }

    fn parse_chains(chains_str: &str) -> Result<Vec<Chain>, Box<dyn std::error::Error>> {
        let chains = chains_str
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Chain>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(chains)
    }

    pub fn get_chain_config(&self, chain: Chain) -> Option<&ChainConfig> {
        self.chain_configs.get(&chain)
    }

    /// Get list of configured chains.
    pub fn configured_chains(&self) -> Vec<Chain> {
        self.chain_configs.keys().copied().collect()
    }
}
