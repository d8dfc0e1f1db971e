use std::sync::Arc;

use axum::{ Router, routing::{ get, post } };
use tower_http::{ cors::CorsLayer, trace::TraceLayer };

pub mod estimations;

use crate::estimations::EstimationsRepository;

#[derive(Clone)]
pub struct AppState {
    pub estimations_repository: Arc<EstimationsRepository>,
}

impl AppState {
    pub fn new(estimations_repository: Arc<EstimationsRepository>) -> Self {
        Self {
            estimations_repository,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/v1/chains/{chain_id}/safes/{address}/multisig-transactions/estimations",
            post(estimations::get_estimation)
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health_check() -> &'static str {
    "OK"
}
