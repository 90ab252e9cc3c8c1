//! Sequential block processor.
//!
//! A processor owns the sync cursor of one `(protocol, network)` pair. Each step reads the
//! cursor, fetches the next block, decodes it and only then advances the cursor by one. A
//! failed step leaves the cursor untouched, so the same block is attempted again by the next
//! step.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
	models::Protocol,
	repositories::SyncCursorStore,
	services::{
		blockchain::BlockChainClient, blockwatcher::BlockWatcherError, decoder::BlockDecoder,
	},
};

/// A unit of block processing driven by the block watcher
#[async_trait]
pub trait BlockProcessor: Send + Sync {
	/// Processes the next block, returning the new cursor value
	async fn step(&self) -> Result<u64, BlockWatcherError>;
}

/// Processes blocks strictly one after the other
pub struct SequentialProcessor<C> {
	protocol: Protocol,
	network: String,
	client: Arc<C>,
	decoder: Arc<dyn BlockDecoder>,
	cursors: Arc<dyn SyncCursorStore>,
}

impl<C: BlockChainClient> SequentialProcessor<C> {
	pub fn new(
		protocol: Protocol,
		network: impl Into<String>,
		client: Arc<C>,
		decoder: Arc<dyn BlockDecoder>,
		cursors: Arc<dyn SyncCursorStore>,
	) -> Self {
		Self {
			protocol,
			network: network.into(),
			client,
			decoder,
			cursors,
		}
	}

	/// Sets the cursor, so the first step processes `start_block + 1`
	pub async fn initialize_cursor(&self, start_block: u64) -> Result<(), BlockWatcherError> {
		self.cursors
			.put_cursor(self.protocol, &self.network, start_block)
			.await
			.map_err(|e| BlockWatcherError::store_failed(e.to_string()))?;
		tracing::info!(
			protocol = %self.protocol,
			network = %self.network,
			start_block,
			"Initialized sync cursor"
		);
		Ok(())
	}
}

#[async_trait]
impl<C: BlockChainClient> BlockProcessor for SequentialProcessor<C> {
	async fn step(&self) -> Result<u64, BlockWatcherError> {
		let current = self
			.cursors
			.get_cursor(self.protocol, &self.network)
			.await
			.map_err(|e| BlockWatcherError::cursor_unavailable(e.to_string()))?
			.ok_or_else(|| {
				BlockWatcherError::cursor_unavailable(format!(
					"no cursor for {} {}",
					self.protocol, self.network
				))
			})?;
		let next = current.checked_add(1).ok_or_else(|| {
			BlockWatcherError::cursor_unavailable(format!(
				"cursor for {} {} is at the last representable block",
				self.protocol, self.network
			))
		})?;

		let block = self.client.get_block_by_number(next).await?;
		self.decoder.run(&block).await?;

		self.cursors
			.put_cursor(self.protocol, &self.network, next)
			.await
			.map_err(|e| BlockWatcherError::store_failed(e.to_string()))?;

		tracing::info!(
			protocol = %self.protocol,
			network = %self.network,
			block_number = next,
			"Processed block"
		);
		Ok(next)
	}
}
