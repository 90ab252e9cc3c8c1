//! Ethereum-family blockchain client implementation.
//!
//! Fetches blocks with full transaction objects through `eth_getBlockByNumber`, keeping the raw
//! signature fields the decoder needs to rebuild the signing payload.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use crate::{
	models::{BlockPayload, EthereumBlock, EthereumRpcBlock},
	services::blockchain::{
		client::BlockChainClient,
		transports::{extract_result, BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::http::HttpRetryConfig,
};

/// Client implementation for Ethereum-family chains
#[derive(Clone)]
pub struct EthereumClient<T: Send + Sync> {
	/// The underlying transport client for RPC communication
	http_client: T,
}

impl<T: Send + Sync> EthereumClient<T> {
	/// Creates a new Ethereum client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl EthereumClient<HttpTransportClient> {
	/// Creates a new Ethereum client instance
	///
	/// # Arguments
	/// * `rpc_address` - JSON-RPC endpoint of the node
	/// * `retry_config` - Per-request retry policy
	pub fn new(rpc_address: &str, retry_config: &HttpRetryConfig) -> Result<Self, BlockChainError> {
		let http_client = HttpTransportClient::new(rpc_address, retry_config)?;
		Ok(Self::new_with_transport(http_client))
	}
}

#[async_trait]
impl<T: Send + Sync + BlockchainTransport> BlockChainClient for EthereumClient<T> {
	/// Retrieves the latest block number
	#[instrument(skip(self))]
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError> {
		let response = self
			.http_client
			.send_raw_request::<serde_json::Value>("eth_blockNumber", None)
			.await?;

		let hex_str = extract_result(&response)?
			.as_str()
			.ok_or_else(|| BlockChainError::request_error("Missing 'result' field".to_string()))?;

		// Parse hex string to u64
		u64::from_str_radix(hex_str.trim_start_matches("0x"), 16).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse block number: {}", e))
		})
	}

	/// Retrieves a block with full transaction objects
	#[instrument(skip(self))]
	async fn get_block_by_number(&self, number: u64) -> Result<BlockPayload, BlockChainError> {
		let params = json!([
			format!("0x{:x}", number),
			true // include full transaction objects
		]);

		let response = self
			.http_client
			.send_raw_request("eth_getBlockByNumber", Some(params))
			.await?;

		let block_data = extract_result(&response)?;
		if block_data.is_null() {
			return Err(BlockChainError::block_not_found(number));
		}

		let block: EthereumRpcBlock = serde_json::from_value(block_data.clone()).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse block: {}", e))
		})?;

		Ok(BlockPayload::Ethereum(Box::new(EthereumBlock::from(
			block,
		))))
	}
}
