use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

// ─── Chain ───────────────────────────────────────────────────────────

/// Networks with a known transaction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Ethereum,
    Optimism,
    Bsc,
    Gnosis,
    Polygon,
    Base,
    Arbitrum,
    Avalanche,
    Sepolia,
}

impl Chain {
    /// Canonical name, also used as the env var prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ETHEREUM",
            Chain::Optimism => "OPTIMISM",
            Chain::Bsc => "BSC",
            Chain::Gnosis => "GNOSIS",
            Chain::Polygon => "POLYGON",
            Chain::Base => "BASE",
            Chain::Arbitrum => "ARBITRUM",
            Chain::Avalanche => "AVALANCHE",
            Chain::Sepolia => "SEPOLIA",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Optimism => 10,
            Chain::Bsc => 56,
            Chain::Gnosis => 100,
            Chain::Polygon => 137,
            Chain::Base => 8453,
            Chain::Arbitrum => 42161,
            Chain::Avalanche => 43114,
            Chain::Sepolia => 11155111,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Chain> {
        Chain::all()
            .iter()
            .copied()
            .find(|c| c.chain_id() == chain_id)
    }

    /// Strict lookup for request paths: only the exact numeric id, no aliases.
    pub fn from_canonical_id(chain_id: &str) -> Option<Chain> {
        let id: u64 = chain_id.parse().ok()?;
        Chain::from_chain_id(id).filter(|c| c.chain_id().to_string() == chain_id)
    }

    /// Public transaction service used when no override is configured.
    pub fn default_transaction_service_url(&self) -> &'static str {
        match self {
            Chain::Ethereum => "https://safe-transaction-mainnet.safe.global",
            Chain::Optimism => "https://safe-transaction-optimism.safe.global",
            Chain::Bsc => "https://safe-transaction-bsc.safe.global",
            Chain::Gnosis => "https://safe-transaction-gnosis-chain.safe.global",
            Chain::Polygon => "https://safe-transaction-polygon.safe.global",
            Chain::Base => "https://safe-transaction-base.safe.global",
            Chain::Arbitrum => "https://safe-transaction-arbitrum.safe.global",
            Chain::Avalanche => "https://safe-transaction-avalanche.safe.global",
            Chain::Sepolia => "https://safe-transaction-sepolia.safe.global",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::Optimism => "Optimism",
            Chain::Bsc => "BSC",
            Chain::Gnosis => "Gnosis",
            Chain::Polygon => "Polygon",
            Chain::Base => "Base",
            Chain::Arbitrum => "Arbitrum",
            Chain::Avalanche => "Avalanche",
            Chain::Sepolia => "Sepolia",
        }
    }

    pub fn all() -> &'static [Chain] {
        &[
            Chain::Ethereum,
            Chain::Optimism,
            Chain::Bsc,
            Chain::Gnosis,
            Chain::Polygon,
            Chain::Base,
            Chain::Arbitrum,
            Chain::Avalanche,
            Chain::Sepolia,
        ]
    }
}

/// Chains are addressed by their numeric id on the wire.
impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chain_id())
    }
}

impl FromStr for Chain {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(id) = trimmed.parse::<u64>() {
            return Chain::from_chain_id(id).ok_or_else(|| AppError::UnknownChain(s.to_string()));
        }

        match trimmed.to_uppercase().as_str() {
            "ETH" | "ETHEREUM" | "MAINNET" => Ok(Chain::Ethereum),
            "OPTIMISM" | "OP" => Ok(Chain::Optimism),
            "BSC" | "BNB" => Ok(Chain::Bsc),
            "GNOSIS" | "XDAI" => Ok(Chain::Gnosis),
            "POLYGON" | "MATIC" | "POL" => Ok(Chain::Polygon),
            "BASE" => Ok(Chain::Base),
            "ARBITRUM" | "ARB" => Ok(Chain::Arbitrum),
            "AVALANCHE" | "AVAX" => Ok(Chain::Avalanche),
            "SEPOLIA" => Ok(Chain::Sepolia),
            _ => Err(AppError::UnknownChain(s.to_string())),
        }
    }
}
