use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::estimations::EstimationRequest;

/// Untrusted payload as returned by a transaction service.
pub type RawEstimationData = serde_json::Value;

#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Fetch a raw estimation for `request.address` with `request.params`
    async fn get_estimation(&self, request: &EstimationRequest) -> Result<RawEstimationData>;
}

#[async_trait]
pub trait TransactionApiResolver: Send + Sync {
    /// Resolve the client serving `chain_id`, failing with `UnknownChain`
    async fn get_transaction_api(&self, chain_id: &str) -> Result<Arc<dyn TransactionApi>>;
}

/// Turns untrusted data into a well-formed `T` or a `Validation` error.
pub trait Validator<T>: Send + Sync {
    fn validate(&self, data: RawEstimationData) -> Result<T>;
}
