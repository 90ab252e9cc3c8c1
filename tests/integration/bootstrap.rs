use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;
use tokio::sync::watch;

use crate::integration::mocks::{
	address_of, ethereum_payload, mailchain_args, signed_legacy_tx, sr25519_extrinsic,
	substrate_payload, MockBlockSource,
};
use chain_key_indexer::{
	bootstrap::{create_decoder, create_processor, run_indexer},
	models::{BlockPayload, IndexerConfig, Protocol, RetrySettings},
	repositories::{FileStore, PublicKeyStore, SyncCursorStore, TransactionStore},
	services::{
		blockchain::BlockChainError,
		blockwatcher::{BlockWatcherService, BlockWatcherError},
		decoder::{ss58_address, DecoderStores},
	},
	utils::retry::RetryConfig,
};

fn config(protocol: Protocol, network: &str, data_dir: PathBuf) -> IndexerConfig {
	IndexerConfig {
		protocol,
		network: network.to_string(),
		rpc_address: "http://localhost:8545".to_string(),
		start_block: 99,
		data_dir,
		retry: RetrySettings {
			max_retries: 2,
			initial_delay_ms: 1,
			max_delay_ms: 2,
		},
	}
}

/// Serves blocks up to `head`, later blocks are not found
fn chain_up_to(head: u64, block: fn(u64) -> BlockPayload) -> MockBlockSource {
	let mut client = MockBlockSource::new();
	client
		.expect_get_latest_block_number()
		.returning(move || Ok(head));
	client.expect_get_block_by_number().returning(move |n| {
		if n <= head {
			Ok(block(n))
		} else {
			Err(BlockChainError::block_not_found(n))
		}
	});
	client
}

#[tokio::test]
async fn test_ethereum_indexer_runs_until_budget_is_exhausted() {
	let dir = TempDir::new().unwrap();
	let config = config(Protocol::Ethereum, "mainnet", dir.path().to_path_buf());
	let store = Arc::new(FileStore::new(dir.path()));
	let decoder = create_decoder(&config, DecoderStores::from_store(store.clone())).unwrap();

	let client = chain_up_to(102, |n| {
		ethereum_payload(n, vec![signed_legacy_tx([0x11; 32], 1, n, b"mailchain")])
	});
	let processor = create_processor(&config, client, decoder, store.clone())
		.await
		.unwrap();

	let (_tx, rx) = watch::channel(false);
	let service = BlockWatcherService::new(processor, RetryConfig::from(config.retry));
	let result = service.run(rx).await;
	assert!(matches!(result, Err(BlockWatcherError::FetchFailed(_))));

	assert_eq!(
		store.get_cursor(Protocol::Ethereum, "mainnet").await.unwrap(),
		Some(102)
	);
	let sent = store
		.get_transactions_by_from(
			Protocol::Ethereum,
			"mainnet",
			address_of([0x11; 32]).as_slice(),
		)
		.await
		.unwrap();
	assert_eq!(
		sent.iter().map(|tx| tx.block_number).collect::<Vec<_>>(),
		vec![100, 101, 102]
	);
}

#[tokio::test]
async fn test_substrate_indexer_indexes_signers() {
	let dir = TempDir::new().unwrap();
	let config = config(Protocol::Substrate, "edgeware-beresheet", dir.path().to_path_buf());
	let store = Arc::new(FileStore::new(dir.path()));
	let decoder = create_decoder(&config, DecoderStores::from_store(store.clone())).unwrap();

	let client = chain_up_to(100, |n| {
		substrate_payload(
			n,
			vec![sr25519_extrinsic([0x01; 32], mailchain_args([0x02; 32], b"hi"))],
		)
	});
	let processor = create_processor(&config, client, decoder, store.clone())
		.await
		.unwrap();

	let (_tx, rx) = watch::channel(false);
	let service = BlockWatcherService::new(processor, RetryConfig::from(config.retry));
	assert!(service.run(rx).await.is_err());

	assert_eq!(
		store
			.get_cursor(Protocol::Substrate, "edgeware-beresheet")
			.await
			.unwrap(),
		Some(100)
	);
	let from = ss58_address(&[0x01; 32], 7);
	assert!(store
		.get_public_key(Protocol::Substrate, "edgeware-beresheet", from.as_bytes())
		.await
		.unwrap()
		.is_some());
}

#[tokio::test]
async fn test_substrate_decoder_needs_ss58_network() {
	let dir = TempDir::new().unwrap();
	let config = config(Protocol::Substrate, "mainnet", dir.path().to_path_buf());
	let store = Arc::new(FileStore::new(dir.path()));
	assert!(create_decoder(&config, DecoderStores::from_store(store)).is_err());
}

#[tokio::test]
async fn test_run_indexer_rejects_invalid_config() {
	let dir = TempDir::new().unwrap();
	let mut config = config(Protocol::Ethereum, "mainnet", dir.path().to_path_buf());
	config.rpc_address = "ftp://localhost".to_string();

	let (_tx, rx) = watch::channel(false);
	assert!(run_indexer(config, rx).await.is_err());
	assert!(!dir.path().join("1_1").exists());
}

#[tokio::test]
async fn test_run_indexer_against_node() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(
			serde_json::json!({"method": "eth_blockNumber"}),
		))
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x63"}"#)
		.create_async()
		.await;
	server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(
			serde_json::json!({"method": "eth_getBlockByNumber"}),
		))
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":null}"#)
		.create_async()
		.await;

	let dir = TempDir::new().unwrap();
	let mut config = config(Protocol::Ethereum, "mainnet", dir.path().to_path_buf());
	config.rpc_address = server.url();

	let (_tx, rx) = watch::channel(false);
	assert!(run_indexer(config, rx).await.is_err());

	// the cursor was initialized but never advanced past the missing block
	let store = FileStore::new(dir.path());
	assert_eq!(
		store.get_cursor(Protocol::Ethereum, "mainnet").await.unwrap(),
		Some(99)
	);
}
