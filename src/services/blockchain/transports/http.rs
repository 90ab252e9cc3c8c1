//! HTTP transport implementation for blockchain interactions.
//!
//! Sends JSON-RPC requests to a single node URL. Transient failures are retried by the
//! client middleware; nothing is sent until the first request.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::DefaultRetryableStrategy;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
	services::blockchain::{transports::BlockchainTransport, BlockChainError},
	utils::http::{build_base_client, create_retryable_http_client, HttpRetryConfig},
};

/// Basic HTTP transport client for blockchain interactions
///
/// Requests that fail with a transient error (connection failures, timeouts, 5xx and 429
/// responses) are retried by the middleware with exponential backoff before an error is
/// returned to the caller.
///
/// The client is thread-safe and can be shared across multiple tasks.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// HTTP client with the retry middleware
	client: ClientWithMiddleware,
	/// The RPC endpoint
	url: Url,
}

impl HttpTransportClient {
	/// Creates a new HTTP transport client for a single endpoint
	///
	/// # Arguments
	/// * `rpc_address` - The JSON-RPC endpoint
	/// * `retry_config` - Retry policy applied to every request
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or configuration error
	pub fn new(rpc_address: &str, retry_config: &HttpRetryConfig) -> Result<Self, BlockChainError> {
		let url = Url::parse(rpc_address).map_err(|e| {
			BlockChainError::connection_error(format!("Invalid URL {}: {}", rpc_address, e))
		})?;

		let http_client = build_base_client(retry_config).map_err(|e| {
			BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e))
		})?;

		let client = create_retryable_http_client(
			retry_config,
			http_client,
			None::<DefaultRetryableStrategy>,
		);

		Ok(Self { client, url })
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	/// Retrieves the RPC endpoint URL
	async fn get_current_url(&self) -> String {
		self.url.to_string()
	}

	/// Sends a JSON-RPC request to the blockchain node
	///
	/// # Arguments
	/// * `method` - The JSON-RPC method name to call
	/// * `params` - Optional parameters for the method call
	///
	/// # Returns
	/// * `Result<Value, BlockChainError>` - JSON response or error
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request_body = self.customize_request(method, params).await;

		let response = self
			.client
			.post(self.url.clone())
			.json(&request_body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let error_body = response.text().await.unwrap_or_default();
			tracing::warn!("Request failed with status {}: {}", status, error_body);
			return Err(BlockChainError::request_error(format!(
				"HTTP {} from {}: {}",
				status.as_u16(),
				self.url,
				error_body
			)));
		}

		response.json().await.map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse JSON response: {}", e))
		})
	}
}
