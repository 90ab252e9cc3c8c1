//! Network transport implementations for blockchain clients.
//!
//! Block sources talk JSON-RPC 2.0 over HTTP. The transport owns the request envelope and the
//! per-request retry middleware; the clients only deal with methods, params and results.

mod http;

pub use http::HttpTransportClient;

use serde::Serialize;
use serde_json::{json, Value};

use crate::services::blockchain::BlockChainError;

/// Base trait for all blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the current URL being used by the transport
	async fn get_current_url(&self) -> String;

	/// Send a raw request to the blockchain
	///
	/// Returns the full JSON-RPC response object; callers read its `result` field.
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize;

	/// Customizes the request for specific blockchain requirements
	async fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		// Default implementation for JSON-RPC
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.map(|p| p.into())
		})
	}
}

/// Extracts the `result` field of a JSON-RPC response
///
/// A JSON-RPC `error` object is reported as a request error. A `null` result is returned as
/// is, since only the caller knows whether it means "not found".
pub fn extract_result(response: &Value) -> Result<&Value, BlockChainError> {
	if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
		let message = error
			.get("message")
			.and_then(|m| m.as_str())
			.unwrap_or("unknown error");
		return Err(BlockChainError::request_error(format!(
			"JSON-RPC error: {}",
			message
		)));
	}
	response
		.get("result")
		.ok_or_else(|| BlockChainError::request_error("Missing 'result' field".to_string()))
}
