use axum::{ extract::{ rejection::JsonRejection, Path, State }, Json };
use ethers::{ types::Address, utils::to_checksum };

use crate::error::{ AppError, Result };
use crate::estimations::{ Estimation, EstimationParams, EstimationRequest };

use super::AppState;

pub async fn get_estimation(
    State(state): State<AppState>,
    Path((chain_id, address)): Path<(String, String)>,
    payload: std::result::Result<Json<EstimationParams>, JsonRejection>
) -> Result<Json<Estimation>> {
    let address = checksummed_address(&address)?;
    let Json(params) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let estimation = state.estimations_repository.get_estimation(
        EstimationRequest::new(&chain_id, &address, params)
    ).await?;

    Ok(Json(estimation))
}

/// Parses an EVM address and returns its EIP-55 form. Mixed-case input
/// must already carry a valid checksum.
fn checksummed_address(input: &str) -> Result<String> {
    let address: Address = input.parse().map_err(|_| AppError::InvalidAddress)?;
    let checksummed = to_checksum(&address, None);

    let hex = input.strip_prefix("0x").unwrap_or(input);
    let mixed_case =
        hex.bytes().any(|b| b.is_ascii_uppercase()) && hex.bytes().any(|b| b.is_ascii_lowercase());

    if mixed_case && checksummed[2..] != *hex {
        return Err(AppError::InvalidAddress);
    }

    Ok(checksummed)
}
