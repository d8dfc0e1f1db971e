use std::sync::Arc;

use crate::error::Result;
use crate::estimations::{ Estimation, EstimationRequest };
use crate::providers::{ TransactionApiResolver, Validator };

/// Fetches estimations from the chain's transaction service and only
/// hands them out once they pass validation.
pub struct EstimationsRepository {
    transaction_api_manager: Arc<dyn TransactionApiResolver>,
    validator: Arc<dyn Validator<Estimation>>,
}

impl EstimationsRepository {
    pub fn new(
        transaction_api_manager: Arc<dyn TransactionApiResolver>,
        validator: Arc<dyn Validator<Estimation>>
    ) -> Self {
        Self {
            transaction_api_manager,
            validator,
        }
    }

    /// Errors from the resolver, the service and the validator are returned as-is.
    pub async fn get_estimation(&self, request: EstimationRequest) -> Result<Estimation> {
        let api = self.transaction_api_manager.get_transaction_api(&request.chain_id).await?;

        tracing::debug!(
            "Requesting estimation for {} on chain {}",
            request.address,
            request.chain_id
        );

        let data = api.get_estimation(&request).await?;

        self.validator.validate(data)
    }
}
