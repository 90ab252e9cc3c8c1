use mockall::predicate;
use std::sync::Arc;

use crate::integration::mocks::{
	ethereum_payload, signed_legacy_tx, MockBlockSource, MockCursorStore, MockDecoder,
};
use chain_key_indexer::{
	models::Protocol,
	repositories::{MemoryStore, RepositoryError, SyncCursorStore},
	services::{
		blockchain::BlockChainError,
		blockwatcher::{BlockProcessor, BlockWatcherError, SequentialProcessor},
		decoder::{
			DecodeError, DecoderStores, EthereumBlockDecoder, EthereumTransactionDecoder,
		},
	},
};

fn processor(
	client: MockBlockSource,
	decoder: MockDecoder,
	cursors: MockCursorStore,
) -> SequentialProcessor<MockBlockSource> {
	SequentialProcessor::new(
		Protocol::Ethereum,
		"mainnet",
		Arc::new(client),
		Arc::new(decoder),
		Arc::new(cursors),
	)
}

fn cursor_at(block: Option<u64>) -> MockCursorStore {
	let mut cursors = MockCursorStore::new();
	cursors
		.expect_get_cursor()
		.with(predicate::eq(Protocol::Ethereum), predicate::eq("mainnet"))
		.times(1)
		.returning(move |_, _| Ok(block));
	cursors
}

#[tokio::test]
async fn test_step_processes_next_block_and_advances_once() {
	let mut client = MockBlockSource::new();
	client
		.expect_get_block_by_number()
		.with(predicate::eq(2))
		.times(1)
		.returning(|n| Ok(ethereum_payload(n, vec![])));

	let mut decoder = MockDecoder::new();
	decoder
		.expect_run()
		.withf(|block| block.number() == Some(2))
		.times(1)
		.returning(|_| Ok(()));

	let mut cursors = cursor_at(Some(1));
	cursors
		.expect_put_cursor()
		.with(
			predicate::eq(Protocol::Ethereum),
			predicate::eq("mainnet"),
			predicate::eq(2),
		)
		.times(1)
		.returning(|_, _, _| Ok(()));

	let result = processor(client, decoder, cursors).step().await;
	assert_eq!(result.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_cursor_is_unavailable() {
	let mut client = MockBlockSource::new();
	client.expect_get_block_by_number().times(0);
	let mut decoder = MockDecoder::new();
	decoder.expect_run().times(0);
	let mut cursors = cursor_at(None);
	cursors.expect_put_cursor().times(0);

	let result = processor(client, decoder, cursors).step().await;
	assert!(matches!(result, Err(BlockWatcherError::CursorUnavailable(_))));
}

#[tokio::test]
async fn test_cursor_at_last_block_is_unavailable() {
	let mut client = MockBlockSource::new();
	client.expect_get_block_by_number().times(0);
	let mut decoder = MockDecoder::new();
	decoder.expect_run().times(0);
	let mut cursors = cursor_at(Some(u64::MAX));
	cursors.expect_put_cursor().times(0);

	let result = processor(client, decoder, cursors).step().await;
	assert!(matches!(result, Err(BlockWatcherError::CursorUnavailable(_))));
}

#[tokio::test]
async fn test_cursor_read_error_is_unavailable() {
	let client = MockBlockSource::new();
	let decoder = MockDecoder::new();
	let mut cursors = MockCursorStore::new();
	cursors
		.expect_get_cursor()
		.returning(|_, _| Err(RepositoryError::load_error("corrupt cursor")));
	cursors.expect_put_cursor().times(0);

	let result = processor(client, decoder, cursors).step().await;
	assert!(matches!(result, Err(BlockWatcherError::CursorUnavailable(_))));
}

#[tokio::test]
async fn test_fetch_failure_keeps_cursor() {
	let mut client = MockBlockSource::new();
	client
		.expect_get_block_by_number()
		.times(1)
		.returning(|n| Err(BlockChainError::block_not_found(n)));
	let mut decoder = MockDecoder::new();
	decoder.expect_run().times(0);
	let mut cursors = cursor_at(Some(10));
	cursors.expect_put_cursor().times(0);

	let result = processor(client, decoder, cursors).step().await;
	assert!(matches!(result, Err(BlockWatcherError::FetchFailed(_))));
}

#[tokio::test]
async fn test_decode_failure_keeps_cursor() {
	let mut client = MockBlockSource::new();
	client
		.expect_get_block_by_number()
		.returning(|n| Ok(ethereum_payload(n, vec![])));
	let mut decoder = MockDecoder::new();
	decoder
		.expect_run()
		.times(1)
		.returning(|_| Err(DecodeError::TxNotInBlock("0x01".to_string())));
	let mut cursors = cursor_at(Some(10));
	cursors.expect_put_cursor().times(0);

	let result = processor(client, decoder, cursors).step().await;
	assert!(matches!(
		result,
		Err(BlockWatcherError::DecodeFailed(DecodeError::TxNotInBlock(_)))
	));
}

#[tokio::test]
async fn test_cursor_write_failure_is_store_failed() {
	let mut client = MockBlockSource::new();
	client
		.expect_get_block_by_number()
		.returning(|n| Ok(ethereum_payload(n, vec![])));
	let mut decoder = MockDecoder::new();
	decoder.expect_run().returning(|_| Ok(()));
	let mut cursors = cursor_at(Some(10));
	cursors
		.expect_put_cursor()
		.times(1)
		.returning(|_, _, _| Err(RepositoryError::internal_error("read-only")));

	let result = processor(client, decoder, cursors).step().await;
	assert!(matches!(result, Err(BlockWatcherError::StoreFailed(_))));
}

#[tokio::test]
async fn test_initialize_cursor_writes_start_block() {
	let mut cursors = MockCursorStore::new();
	cursors
		.expect_put_cursor()
		.with(
			predicate::eq(Protocol::Ethereum),
			predicate::eq("mainnet"),
			predicate::eq(100),
		)
		.times(1)
		.returning(|_, _, _| Ok(()));

	processor(MockBlockSource::new(), MockDecoder::new(), cursors)
		.initialize_cursor(100)
		.await
		.unwrap();
}

#[tokio::test]
async fn test_steps_walk_the_chain_with_real_decoder() {
	let store = Arc::new(MemoryStore::new());
	let mut client = MockBlockSource::new();
	client.expect_get_block_by_number().times(3).returning(|n| {
		Ok(ethereum_payload(
			n,
			vec![signed_legacy_tx([0x11; 32], 1, n, b"mailchain")],
		))
	});
	let decoder = EthereumBlockDecoder::new(EthereumTransactionDecoder::new(
		"mainnet",
		DecoderStores::from_store(store.clone()),
	));
	let processor = SequentialProcessor::new(
		Protocol::Ethereum,
		"mainnet",
		Arc::new(client),
		Arc::new(decoder),
		store.clone(),
	);

	processor.initialize_cursor(7).await.unwrap();
	for expected in 8..=10 {
		assert_eq!(processor.step().await.unwrap(), expected);
	}
	assert_eq!(
		store.get_cursor(Protocol::Ethereum, "mainnet").await.unwrap(),
		Some(10)
	);
}
