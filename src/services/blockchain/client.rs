//! Core blockchain client interface.
//!
//! This module defines the block source interface every protocol client implements, so the
//! block watcher can walk any supported chain the same way.

use async_trait::async_trait;

use crate::{models::BlockPayload, services::blockchain::BlockChainError};

/// Defines the core interface for blockchain clients
///
/// This trait must be implemented by all blockchain-specific clients to provide
/// standardized access to blockchain data.
#[async_trait]
pub trait BlockChainClient: Send + Sync {
	/// Retrieves the latest block number from the blockchain
	///
	/// # Returns
	/// * `Result<u64, BlockChainError>` - The latest block number or an error
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;

	/// Retrieves a single block with its full transaction data
	///
	/// # Arguments
	/// * `number` - The block number
	///
	/// # Returns
	/// * `Result<BlockPayload, BlockChainError>` - The block, or
	///   [`BlockChainError::BlockNotFound`] when the node does not know it yet
	async fn get_block_by_number(&self, number: u64) -> Result<BlockPayload, BlockChainError>;
}
