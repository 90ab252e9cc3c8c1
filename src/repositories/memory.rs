//! In-memory store adapter.
//!
//! Implements every storage port over hash maps guarded by tokio locks. Entries are keyed by
//! the numeric protocol and network codes, so unknown names are rejected exactly like the file
//! store rejects them.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{
	models::{network_code, protocol_code, NormalizedTransaction, Protocol, PublicKeyRecord},
	repositories::{
		error::RepositoryError, PublicKeyStore, RawTransactionStore, SyncCursorStore,
		TransactionStore,
	},
};

type NetworkKey = (u8, u8);
type EntryKey = (u8, u8, Vec<u8>);

fn network_key(protocol: Protocol, network: &str) -> Result<NetworkKey, RepositoryError> {
	Ok((
		protocol_code(protocol.as_str())?,
		network_code(protocol.as_str(), network)?,
	))
}

fn entry_key(protocol: Protocol, network: &str, key: &[u8]) -> Result<EntryKey, RepositoryError> {
	let (protocol, network) = network_key(protocol, network)?;
	Ok((protocol, network, key.to_vec()))
}

/// Store keeping every record in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
	cursors: RwLock<HashMap<NetworkKey, u64>>,
	public_keys: RwLock<HashMap<EntryKey, PublicKeyRecord>>,
	transactions: RwLock<HashMap<EntryKey, NormalizedTransaction>>,
	raw_transactions: RwLock<HashMap<EntryKey, Vec<u8>>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	async fn transactions_matching<F>(
		&self,
		protocol: Protocol,
		network: &str,
		predicate: F,
	) -> Result<Vec<NormalizedTransaction>, RepositoryError>
	where
		F: Fn(&NormalizedTransaction) -> bool + Send,
	{
		let (protocol, network) = network_key(protocol, network)?;
		let transactions = self.transactions.read().await;
		let mut matching: Vec<NormalizedTransaction> = transactions
			.iter()
			.filter(|((p, n, _), tx)| *p == protocol && *n == network && predicate(tx))
			.map(|(_, tx)| tx.clone())
			.collect();
		matching.sort_by(|a, b| {
			a.block_number
				.cmp(&b.block_number)
				.then_with(|| a.hash.cmp(&b.hash))
		});
		Ok(matching)
	}
}

#[async_trait]
impl SyncCursorStore for MemoryStore {
	async fn get_cursor(
		&self,
		protocol: Protocol,
		network: &str,
	) -> Result<Option<u64>, RepositoryError> {
		let key = network_key(protocol, network)?;
		Ok(self.cursors.read().await.get(&key).copied())
	}

	async fn put_cursor(
		&self,
		protocol: Protocol,
		network: &str,
		block_number: u64,
	) -> Result<(), RepositoryError> {
		let key = network_key(protocol, network)?;
		self.cursors.write().await.insert(key, block_number);
		Ok(())
	}
}

#[async_trait]
impl PublicKeyStore for MemoryStore {
	async fn put_public_key(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
		record: &PublicKeyRecord,
	) -> Result<(), RepositoryError> {
		let key = entry_key(protocol, network, address)?;
		self.public_keys.write().await.insert(key, record.clone());
		Ok(())
	}

	async fn get_public_key(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
	) -> Result<Option<PublicKeyRecord>, RepositoryError> {
		let key = entry_key(protocol, network, address)?;
		Ok(self.public_keys.read().await.get(&key).cloned())
	}
}

#[async_trait]
impl TransactionStore for MemoryStore {
	async fn put_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
		tx: &NormalizedTransaction,
	) -> Result<(), RepositoryError> {
		let key = entry_key(protocol, network, hash)?;
		self.transactions.write().await.insert(key, tx.clone());
		Ok(())
	}

	async fn get_transactions_by_from(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
	) -> Result<Vec<NormalizedTransaction>, RepositoryError> {
		self.transactions_matching(protocol, network, |tx| tx.from == address)
			.await
	}

	async fn get_transactions_by_to(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
	) -> Result<Vec<NormalizedTransaction>, RepositoryError> {
		self.transactions_matching(protocol, network, |tx| tx.to == address)
			.await
	}
}

#[async_trait]
impl RawTransactionStore for MemoryStore {
	async fn put_raw_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
		raw: &[u8],
	) -> Result<(), RepositoryError> {
		let key = entry_key(protocol, network, hash)?;
		self.raw_transactions.write().await.insert(key, raw.to_vec());
		Ok(())
	}

	async fn get_raw_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
	) -> Result<Option<Vec<u8>>, RepositoryError> {
		let key = entry_key(protocol, network, hash)?;
		Ok(self.raw_transactions.read().await.get(&key).cloned())
	}
}
