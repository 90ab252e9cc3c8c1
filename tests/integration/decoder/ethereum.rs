use alloy::primitives::{B256, U256};
use std::sync::Arc;
use tracing_test::traced_test;

use crate::integration::mocks::{
	address_of, ethereum_block, ethereum_payload, public_key_of, signed_legacy_tx,
	substrate_payload, MockKeyStore, MockTxStore, ETHEREUM_BLOCK_HASH,
};
use chain_key_indexer::{
	models::{EthereumTxContext, KeyKind, Protocol, TxContext},
	repositories::{
		MemoryStore, PublicKeyStore, RawTransactionStore, RepositoryError, TransactionStore,
	},
	services::decoder::{
		BlockDecoder, DecodeError, DecoderStores, EthereumBlockDecoder,
		EthereumTransactionDecoder,
	},
};

const SENDER: [u8; 32] = [0x11; 32];
const OTHER_SENDER: [u8; 32] = [0x22; 32];

fn memory_decoder() -> (Arc<MemoryStore>, EthereumBlockDecoder) {
	let store = Arc::new(MemoryStore::new());
	let decoder = EthereumBlockDecoder::new(EthereumTransactionDecoder::new(
		"mainnet",
		DecoderStores::from_store(store.clone()),
	));
	(store, decoder)
}

fn mock_stores(keys: MockKeyStore, txs: MockTxStore) -> DecoderStores {
	let txs = Arc::new(txs);
	DecoderStores {
		public_keys: Arc::new(keys),
		transactions: txs.clone(),
		raw_transactions: txs,
	}
}

/// Stores that fail the test on any write
fn untouched_stores() -> DecoderStores {
	let mut keys = MockKeyStore::new();
	keys.expect_put_public_key().times(0);
	let mut txs = MockTxStore::new();
	txs.expect_put_transaction().times(0);
	txs.expect_put_raw_transaction().times(0);
	mock_stores(keys, txs)
}

#[tokio::test]
#[traced_test]
async fn test_mailchain_transaction_is_indexed() {
	let (store, decoder) = memory_decoder();
	let tx = signed_legacy_tx(SENDER, 1, 0, b"mailchain\x01\x02");
	let sender = address_of(SENDER);

	decoder
		.run(&ethereum_payload(42, vec![tx.clone()]))
		.await
		.unwrap();

	let record = store
		.get_public_key(Protocol::Ethereum, "mainnet", sender.as_slice())
		.await
		.unwrap()
		.expect("public key stored");
	assert_eq!(record.public_key, public_key_of(SENDER).to_vec());
	assert_eq!(record.key_kind, KeyKind::Secp256k1);
	assert_eq!(record.address, sender.to_vec());
	assert_eq!(record.block_hash, ETHEREUM_BLOCK_HASH.to_vec());
	assert_eq!(record.tx_hash, tx.hash().to_vec());

	let stored = store
		.get_transactions_by_from(Protocol::Ethereum, "mainnet", sender.as_slice())
		.await
		.unwrap();
	assert_eq!(stored.len(), 1);
	assert_eq!(stored[0].data, b"mailchain\x01\x02".to_vec());
	assert_eq!(stored[0].block_number, 42);
	assert_eq!(stored[0].value, U256::from(1_000u64));
	assert_eq!(stored[0].gas_used, U256::from(21_000u64));
	assert_eq!(stored[0].gas_price, U256::from(20_000_000_000u64));

	let raw = store
		.get_raw_transaction(Protocol::Ethereum, "mainnet", tx.hash().as_slice())
		.await
		.unwrap()
		.expect("raw transaction stored");
	let raw: serde_json::Value = serde_json::from_slice(&raw).unwrap();
	assert_eq!(raw["hash"], serde_json::to_value(tx.hash()).unwrap());
	assert!(logs_contain("Stored mailchain transaction"));
}

#[tokio::test]
async fn test_plain_transaction_only_stores_key() {
	let (store, decoder) = memory_decoder();
	let tx = signed_legacy_tx(SENDER, 1, 0, b"transfer");
	let sender = address_of(SENDER);

	decoder.run(&ethereum_payload(1, vec![tx.clone()])).await.unwrap();

	assert!(store
		.get_public_key(Protocol::Ethereum, "mainnet", sender.as_slice())
		.await
		.unwrap()
		.is_some());
	assert!(store
		.get_transactions_by_from(Protocol::Ethereum, "mainnet", sender.as_slice())
		.await
		.unwrap()
		.is_empty());
	assert!(store
		.get_raw_transaction(Protocol::Ethereum, "mainnet", tx.hash().as_slice())
		.await
		.unwrap()
		.is_none());
}

#[tokio::test]
async fn test_pre_eip155_transaction_is_recovered() {
	let (store, decoder) = memory_decoder();
	let tx = signed_legacy_tx(SENDER, 0, 3, b"");
	assert!(tx.v == U256::from(27) || tx.v == U256::from(28));

	decoder.run(&ethereum_payload(1, vec![tx])).await.unwrap();

	let record = store
		.get_public_key(Protocol::Ethereum, "mainnet", address_of(SENDER).as_slice())
		.await
		.unwrap()
		.unwrap();
	assert_eq!(record.public_key, public_key_of(SENDER).to_vec());
}

#[tokio::test]
async fn test_every_sender_of_a_block_is_indexed() {
	let (store, decoder) = memory_decoder();
	let txs = vec![
		signed_legacy_tx(SENDER, 1, 0, b""),
		signed_legacy_tx(OTHER_SENDER, 1, 0, b"mailchain"),
	];

	decoder.run(&ethereum_payload(5, txs)).await.unwrap();

	for secret in [SENDER, OTHER_SENDER] {
		assert!(store
			.get_public_key(Protocol::Ethereum, "mainnet", address_of(secret).as_slice())
			.await
			.unwrap()
			.is_some());
	}
}

#[tokio::test]
async fn test_typed_transactions_are_skipped() {
	let decoder = EthereumBlockDecoder::new(EthereumTransactionDecoder::new(
		"mainnet",
		untouched_stores(),
	));
	let mut tx = signed_legacy_tx(SENDER, 1, 0, b"mailchain");
	tx.0.transaction_type = Some(alloy::primitives::U64::from(2));

	decoder.run(&ethereum_payload(1, vec![tx])).await.unwrap();
}

#[tokio::test]
async fn test_first_failure_aborts_the_block() {
	let (store, decoder) = memory_decoder();
	let mut broken = signed_legacy_tx(OTHER_SENDER, 1, 1, b"");
	broken.0.v = U256::from(30);
	let txs = vec![
		signed_legacy_tx(SENDER, 1, 0, b""),
		broken,
		signed_legacy_tx(OTHER_SENDER, 1, 2, b""),
	];

	let result = decoder.run(&ethereum_payload(1, txs)).await;
	assert!(matches!(result, Err(DecodeError::SignatureRecoveryFailed(_))));

	// the transaction before the failure was written, the one after was not reached
	assert!(store
		.get_public_key(Protocol::Ethereum, "mainnet", address_of(SENDER).as_slice())
		.await
		.unwrap()
		.is_some());
	assert!(store
		.get_public_key(Protocol::Ethereum, "mainnet", address_of(OTHER_SENDER).as_slice())
		.await
		.unwrap()
		.is_none());
}

#[tokio::test]
async fn test_transaction_not_in_block_writes_nothing() {
	let decoder = EthereumTransactionDecoder::new("mainnet", untouched_stores());
	let tx = signed_legacy_tx(SENDER, 1, 0, b"mailchain");
	let block = ethereum_block(7, vec![signed_legacy_tx(OTHER_SENDER, 1, 0, b"")]);

	let result = decoder
		.run(&tx, &TxContext::Ethereum(EthereumTxContext { block: &block }))
		.await;
	assert!(matches!(result, Err(DecodeError::TxNotInBlock(_))));
}

#[tokio::test]
async fn test_tampered_signature_writes_nothing() {
	let decoder = EthereumTransactionDecoder::new("mainnet", untouched_stores());
	let mut tx = signed_legacy_tx(SENDER, 1, 0, b"");
	tx.0.r = U256::ZERO;
	tx.0.s = U256::ZERO;
	let block = ethereum_block(7, vec![tx.clone()]);

	let result = decoder
		.run(&tx, &TxContext::Ethereum(EthereumTxContext { block: &block }))
		.await;
	assert!(matches!(result, Err(DecodeError::SignatureRecoveryFailed(_))));
}

#[tokio::test]
async fn test_substrate_payload_is_rejected() {
	let decoder = EthereumBlockDecoder::new(EthereumTransactionDecoder::new(
		"mainnet",
		untouched_stores(),
	));

	let result = decoder.run(&substrate_payload(1, vec![])).await;
	assert!(matches!(
		result,
		Err(DecodeError::WrongPayloadType {
			expected: Protocol::Ethereum,
			actual: Protocol::Substrate,
		})
	));
}

#[tokio::test]
async fn test_key_store_failure_aborts_before_filter() {
	let mut keys = MockKeyStore::new();
	keys.expect_put_public_key()
		.times(1)
		.returning(|_, _, _, _| Err(RepositoryError::internal_error("disk full")));
	let mut txs = MockTxStore::new();
	txs.expect_put_transaction().times(0);
	txs.expect_put_raw_transaction().times(0);
	let decoder = EthereumTransactionDecoder::new("mainnet", mock_stores(keys, txs));

	let tx = signed_legacy_tx(SENDER, 1, 0, b"mailchain");
	let block = ethereum_block(7, vec![tx.clone()]);
	let result = decoder
		.run(&tx, &TxContext::Ethereum(EthereumTxContext { block: &block }))
		.await;
	assert!(matches!(result, Err(DecodeError::StoreFailed(_))));
}

#[tokio::test]
async fn test_mailchain_transaction_is_written_once() {
	let mut keys = MockKeyStore::new();
	keys.expect_put_public_key()
		.times(1)
		.returning(|_, _, _, _| Ok(()));
	let mut txs = MockTxStore::new();
	txs.expect_put_transaction()
		.times(1)
		.returning(|_, _, _, _| Ok(()));
	txs.expect_put_raw_transaction()
		.times(1)
		.returning(|_, _, _, _| Ok(()));
	let decoder = EthereumTransactionDecoder::new("mainnet", mock_stores(keys, txs));

	let tx = signed_legacy_tx(SENDER, 1, 0, b"mailchain");
	let block = ethereum_block(7, vec![tx.clone()]);
	let record = decoder
		.run(&tx, &TxContext::Ethereum(EthereumTxContext { block: &block }))
		.await
		.unwrap();
	assert_eq!(record.from, address_of(SENDER).to_vec());
	assert_eq!(record.hash, tx.hash().to_vec());
	assert_eq!(record.block_hash, ETHEREUM_BLOCK_HASH.to_vec());
	assert_ne!(record.hash, B256::ZERO.to_vec());
}
