use tx_estimations::{ Config, Result };
use std::sync::Arc;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "tx_estimations=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(
        Config::from_env().map_err(|e| tx_estimations::AppError::Config(e.to_string()))?
    );

    let mut chains: Vec<String> = config
        .configured_chains()
        .iter()
        .map(|c| format!("{} ({})", c.display_name(), c))
        .collect();
    chains.sort();
    tracing::info!("Starting tx-estimations for chains: {}", chains.join(", "));

    // Initialize transaction API manager
    let transaction_api_manager = Arc::new(
        tx_estimations::tx_service::TransactionApiManager::new(config.clone())?
    );
    tracing::info!("Transaction API manager initialized");

    let estimations_repository = Arc::new(
        tx_estimations::estimations::EstimationsRepository::new(
            transaction_api_manager,
            Arc::new(tx_estimations::estimations::EstimationsValidator::new())
        )
    );

    let app = tx_estimations::api::router(
        tx_estimations::api::AppState::new(estimations_repository)
    );

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| tx_estimations::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| tx_estimations::AppError::Internal(e.to_string()))?;

    Ok(())
}
