use async_trait::async_trait;

use crate::enums::Chain;
use crate::error::{ AppError, Result };
use crate::estimations::EstimationRequest;
use crate::providers::{ RawEstimationData, TransactionApi };

/// Upper bound on how much of an error body is kept for the caller.
const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Client for one chain's transaction service.
#[derive(Clone)]
pub struct HttpTransactionApi {
    chain: Chain,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpTransactionApi {
    pub fn new(chain: Chain, base_url: &str, api_key: Option<String>, client: reqwest::Client) -> Self {
        Self {
            chain,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn estimation_url(&self, address: &str) -> String {
        format!("{}/api/v1/safes/{}/multisig-transactions/estimations/", self.base_url, address)
    }

    /// Reads at most `MAX_ERROR_BODY_BYTES` of the body, chunk by chunk.
    async fn read_error_body(mut response: reqwest::Response) -> String {
        let mut body = Vec::new();
        let mut truncated = false;

        while let Ok(Some(chunk)) = response.chunk().await {
            let remaining = MAX_ERROR_BODY_BYTES - body.len();
            if chunk.len() > remaining {
                body.extend_from_slice(&chunk[..remaining]);
                truncated = true;
                break;
            }
            body.extend_from_slice(&chunk);
        }

        let mut text = String::from_utf8_lossy(&body).into_owned();
        if truncated {
            text.push_str("... (truncated)");
        }
        text
    }
}

#[async_trait]
impl TransactionApi for HttpTransactionApi {
    async fn get_estimation(&self, request: &EstimationRequest) -> Result<RawEstimationData> {
        let url = self.estimation_url(&request.address);

        let mut builder = self.client.post(&url).json(&request.params);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| AppError::Upstream {
            status: None,
            message: format!("{} transaction service request failed: {}", self.chain.display_name(), e),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::read_error_body(response).await;
            tracing::warn!(
                "{} transaction service returned {} for {}",
                self.chain.display_name(),
                status,
                url
            );
            return Err(AppError::Upstream {
                status: Some(status.as_u16()),
                message: if body.is_empty() { status.to_string() } else { body },
            });
        }

        response.json::<RawEstimationData>().await.map_err(|e| AppError::Upstream {
            status: Some(status.as_u16()),
            message: format!("Invalid JSON from transaction service: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{ Arc, Mutex };

    use axum::{ extract::{ Path, State }, http::{ HeaderMap, StatusCode }, routing::post, Json, Router };
    use serde_json::{ json, Value };

    use crate::estimations::EstimationParams;

    #[derive(Clone, Default)]
    struct Captured {
        inner: Arc<Mutex<Vec<(String, Value, Option<String>)>>>,
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn echo_service(captured: Captured) -> String {
        async fn handler(
            State(captured): State<Captured>,
            Path(address): Path<String>,
            headers: HeaderMap,
            Json(body): Json<Value>
        ) -> Json<Value> {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            captured.inner.lock().unwrap().push((address, body, auth));
            Json(json!({ "fee": "21000", "gasPrice": "5", "safeTxGas": "0" }))
        }

        let router = Router::new()
            .route("/api/v1/safes/{address}/multisig-transactions/estimations/", post(handler))
            .with_state(captured);
        serve(router).await
    }

    fn request() -> EstimationRequest {
        EstimationRequest::new(
            "1",
            "0xABC0000000000000000000000000000000000001",
            EstimationParams::new().with("op", "transfer").with("value", "100")
        )
    }

    #[tokio::test]
    async fn test_posts_params_to_estimations_endpoint() {
        let captured = Captured::default();
        let base_url = echo_service(captured.clone()).await;
        let api = HttpTransactionApi::new(
            Chain::Ethereum,
            &format!("{}/", base_url),
            Some("secret".to_string()),
            reqwest::Client::new()
        );

        let raw = api.get_estimation(&request()).await.unwrap();

        assert_eq!(raw, json!({ "fee": "21000", "gasPrice": "5", "safeTxGas": "0" }));
        let calls = captured.inner.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "0xABC0000000000000000000000000000000000001");
        assert_eq!(calls[0].1, json!({ "op": "transfer", "value": "100" }));
        assert_eq!(calls[0].2.as_deref(), Some("Bearer secret"));
    }

    #[tokio::test]
    async fn test_error_status_becomes_upstream_error() {
        let router = Router::new().route(
            "/api/v1/safes/{address}/multisig-transactions/estimations/",
            post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "invalid operation") })
        );
        let base_url = serve(router).await;
        let api = HttpTransactionApi::new(Chain::Ethereum, &base_url, None, reqwest::Client::new());

        match api.get_estimation(&request()).await {
            Err(AppError::Upstream { status, message }) => {
                assert_eq!(status, Some(422));
                assert_eq!(message, "invalid operation");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_large_error_body_is_capped() {
        let router = Router::new().route(
            "/api/v1/safes/{address}/multisig-transactions/estimations/",
            post(|| async { (StatusCode::BAD_GATEWAY, "x".repeat(1_000_000)) })
        );
        let base_url = serve(router).await;
        let api = HttpTransactionApi::new(Chain::Ethereum, &base_url, None, reqwest::Client::new());

        match api.get_estimation(&request()).await {
            Err(AppError::Upstream { status, message }) => {
                assert_eq!(status, Some(502));
                assert!(message.starts_with(&"x".repeat(MAX_ERROR_BODY_BYTES)));
                assert!(message.ends_with("... (truncated)"));
                assert_eq!(message.len(), MAX_ERROR_BODY_BYTES + "... (truncated)".len());
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_becomes_upstream_error() {
        let router = Router::new().route(
            "/api/v1/safes/{address}/multisig-transactions/estimations/",
            post(|| async { "not json" })
        );
        let base_url = serve(router).await;
        let api = HttpTransactionApi::new(Chain::Ethereum, &base_url, None, reqwest::Client::new());

        assert!(
            matches!(
                api.get_estimation(&request()).await,
                Err(AppError::Upstream { status: Some(200), .. })
            )
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_has_no_status() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpTransactionApi::new(
            Chain::Gnosis,
            &format!("http://{}", addr),
            None,
            reqwest::Client::new()
        );

        match api.get_estimation(&request()).await {
            Err(AppError::Upstream { status, message }) => {
                assert_eq!(status, None);
                assert!(message.starts_with("Gnosis transaction service request failed"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }
}
