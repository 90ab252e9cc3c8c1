//! Bootstrap module wiring the indexer together.
//!
//! From a validated [`IndexerConfig`] it builds the block source for the configured protocol,
//! the file store, the protocol decoder and the sequential processor, and finally runs the
//! driver loop until shutdown or until the retry budget of a step is exhausted.

use std::{error::Error, sync::Arc};
use tokio::sync::watch;

use crate::{
	models::{IndexerConfig, Protocol},
	repositories::{FileStore, SyncCursorStore},
	services::{
		blockchain::{BlockChainClient, EthereumClient, SubstrateClient},
		blockwatcher::{BlockProcessor, BlockWatcherService, SequentialProcessor},
		decoder::{
			BlockDecoder, DecoderStores, EthereumBlockDecoder, EthereumTransactionDecoder,
			SubstrateBlockDecoder, SubstrateExtrinsicDecoder,
		},
	},
	utils::{http::HttpRetryConfig, retry::RetryConfig},
};

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Builds the decoder of the configured protocol on top of `stores`
pub fn create_decoder(
	config: &IndexerConfig,
	stores: DecoderStores,
) -> Result<Arc<dyn BlockDecoder>> {
	let decoder: Arc<dyn BlockDecoder> = match config.protocol {
		Protocol::Ethereum => Arc::new(EthereumBlockDecoder::new(
			EthereumTransactionDecoder::new(&config.network, stores),
		)),
		Protocol::Substrate => Arc::new(SubstrateBlockDecoder::new(
			SubstrateExtrinsicDecoder::new(&config.network, stores)?,
		)),
	};
	Ok(decoder)
}

/// Builds a processor around `client` and sets its cursor to the configured start block
pub async fn create_processor<C>(
	config: &IndexerConfig,
	client: C,
	decoder: Arc<dyn BlockDecoder>,
	cursors: Arc<dyn SyncCursorStore>,
) -> Result<Arc<dyn BlockProcessor>>
where
	C: BlockChainClient + 'static,
{
	match client.get_latest_block_number().await {
		Ok(head) => tracing::info!(
			protocol = %config.protocol,
			network = %config.network,
			head,
			start_block = config.start_block,
			"Connected to block source"
		),
		Err(e) => tracing::warn!(error = %e, "Could not read the chain head"),
	}

	let processor = SequentialProcessor::new(
		config.protocol,
		config.network.clone(),
		Arc::new(client),
		decoder,
		cursors,
	);
	processor.initialize_cursor(config.start_block).await?;
	Ok(Arc::new(processor))
}

/// Builds every component for `config` and runs the driver loop
pub async fn run_indexer(config: IndexerConfig, shutdown: watch::Receiver<bool>) -> Result<()> {
	config.validate()?;

	let store = Arc::new(FileStore::new(&config.data_dir));
	let decoder = create_decoder(&config, DecoderStores::from_store(store.clone()))?;
	let http_config = HttpRetryConfig::default();

	let processor = match config.protocol {
		Protocol::Ethereum => {
			let client = EthereumClient::new(&config.rpc_address, &http_config)?;
			create_processor(&config, client, decoder, store).await?
		}
		Protocol::Substrate => {
			let client = SubstrateClient::new(&config.rpc_address, &http_config)?;
			create_processor(&config, client, decoder, store).await?
		}
	};

	let service = BlockWatcherService::new(processor, RetryConfig::from(config.retry));
	let cursor = service.run(shutdown).await?;
	tracing::info!(cursor = ?cursor, "Indexer stopped");
	Ok(())
}
