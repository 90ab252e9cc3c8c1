//! Substrate-family blockchain client implementation.
//!
//! A block is fetched in two calls: `chain_getBlockHash` resolves the number to a hash and
//! `chain_getBlock` returns the header and the encoded extrinsics. The hash is kept next to the
//! block since the block body does not carry it.

use async_trait::async_trait;
use serde_json::{json, Value};
use subxt::utils::H256;
use tracing::instrument;

use crate::{
	models::{BlockPayload, SubstrateBlock, SubstrateBlockHeader, SubstrateRpcBlock},
	services::blockchain::{
		client::BlockChainClient,
		transports::{extract_result, BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::http::HttpRetryConfig,
};

/// Client implementation for Substrate-family chains
#[derive(Clone)]
pub struct SubstrateClient<T: Send + Sync> {
	/// The underlying transport client for RPC communication
	http_client: T,
}

impl<T: Send + Sync> SubstrateClient<T> {
	/// Creates a new Substrate client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl SubstrateClient<HttpTransportClient> {
	/// Creates a new Substrate client instance
	///
	/// # Arguments
	/// * `rpc_address` - JSON-RPC endpoint of the node
	/// * `retry_config` - Per-request retry policy
	pub fn new(rpc_address: &str, retry_config: &HttpRetryConfig) -> Result<Self, BlockChainError> {
		let http_client = HttpTransportClient::new(rpc_address, retry_config)?;
		Ok(Self::new_with_transport(http_client))
	}
}

impl<T: Send + Sync + BlockchainTransport> SubstrateClient<T> {
	/// Resolves a block number to its hash, `None` when the node does not know the block
	async fn get_block_hash(&self, number: u64) -> Result<Option<H256>, BlockChainError> {
		let response = self
			.http_client
			.send_raw_request("chain_getBlockHash", Some(json!([number])))
			.await?;

		let hash = extract_result(&response)?;
		if hash.is_null() {
			return Ok(None);
		}

		serde_json::from_value(hash.clone()).map(Some).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse block hash: {}", e))
		})
	}
}

#[async_trait]
impl<T: Send + Sync + BlockchainTransport> BlockChainClient for SubstrateClient<T> {
	/// Retrieves the number of the best block
	#[instrument(skip(self))]
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError> {
		let response = self
			.http_client
			.send_raw_request::<Value>("chain_getHeader", None)
			.await?;

		let header: SubstrateBlockHeader = serde_json::from_value(
			extract_result(&response)?.clone(),
		)
		.map_err(|e| BlockChainError::request_error(format!("Failed to parse header: {}", e)))?;

		header.number().ok_or_else(|| {
			BlockChainError::request_error(format!("Invalid block number: {}", header.number))
		})
	}

	/// Retrieves a block with its encoded extrinsics
	#[instrument(skip(self))]
	async fn get_block_by_number(&self, number: u64) -> Result<BlockPayload, BlockChainError> {
		let hash = self
			.get_block_hash(number)
			.await?
			.ok_or_else(|| BlockChainError::block_not_found(number))?;

		let params = json!([format!("0x{}", hex::encode(hash.as_bytes()))]);
		let response = self
			.http_client
			.send_raw_request("chain_getBlock", Some(params))
			.await?;

		let signed_block = extract_result(&response)?;
		if signed_block.is_null() {
			return Err(BlockChainError::block_not_found(number));
		}

		let block_data = signed_block
			.get("block")
			.ok_or_else(|| BlockChainError::request_error("Missing 'block' field".to_string()))?;

		let block: SubstrateRpcBlock = serde_json::from_value(block_data.clone()).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse block: {}", e))
		})?;

		Ok(BlockPayload::Substrate(Box::new(SubstrateBlock::new(
			hash, block,
		))))
	}
}
