//! File-backed store adapter.
//!
//! Every `(protocol, network)` pair gets its own directory named after its numeric codes,
//! e.g. `1_1` for Ethereum mainnet:
//!
//! - `cursor.json`: the sync cursor
//! - `public_keys/<address>.json`: one public key row per hex address
//! - `transactions/<hash>.json`: one transaction row per hex hash
//! - `raw/<hash>.bin`: raw transaction bytes
//!
//! A write touches a single record file. Files are replaced through a temporary file and a
//! rename, so a crash never leaves a half-written record behind.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::{
	models::{
		network_code, protocol_code, NormalizedTransaction, Protocol, PublicKeyRecord, SyncCursor,
	},
	repositories::{
		encoding::{PublicKeyRow, TransactionRow},
		error::RepositoryError,
		PublicKeyStore, RawTransactionStore, SyncCursorStore, TransactionStore,
	},
};

const CURSOR_FILE: &str = "cursor.json";
const PUBLIC_KEYS_DIR: &str = "public_keys";
const TRANSACTIONS_DIR: &str = "transactions";
const RAW_DIR: &str = "raw";

/// Store persisting records as JSON files under a data directory
pub struct FileStore {
	storage_path: PathBuf,
	write_lock: Mutex<()>,
}

impl FileStore {
	pub fn new(storage_path: impl Into<PathBuf>) -> Self {
		FileStore {
			storage_path: storage_path.into(),
			write_lock: Mutex::new(()),
		}
	}

	/// Directory of a `(protocol, network)` pair, created on first use
	async fn network_dir(
		&self,
		protocol: Protocol,
		network: &str,
	) -> Result<PathBuf, RepositoryError> {
		let dir = self.storage_path.join(format!(
			"{}_{}",
			protocol_code(protocol.as_str())?,
			network_code(protocol.as_str(), network)?
		));
		tokio::fs::create_dir_all(&dir).await?;
		Ok(dir)
	}

	async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
		if !tokio::fs::try_exists(path).await? {
			return Ok(None);
		}
		let content = tokio::fs::read(path).await.map_err(|e| {
			RepositoryError::load_error(format!("failed to read {}: {}", path.display(), e))
		})?;
		Ok(Some(serde_json::from_slice(&content)?))
	}

	async fn write_atomic(path: &Path, content: &[u8]) -> Result<(), RepositoryError> {
		let tmp = path.with_extension("tmp");
		tokio::fs::write(&tmp, content).await.map_err(|e| {
			RepositoryError::internal_error(format!("failed to write {}: {}", tmp.display(), e))
		})?;
		tokio::fs::rename(&tmp, path).await?;
		Ok(())
	}

	async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RepositoryError> {
		let content = serde_json::to_vec_pretty(value)
			.map_err(|e| RepositoryError::internal_error(e.to_string()))?;
		Self::write_atomic(path, &content).await
	}

	/// Path of the record file `<key>.json` under `dir/records`, creating `records`
	async fn record_path(
		dir: &Path,
		records: &str,
		key: &[u8],
	) -> Result<PathBuf, RepositoryError> {
		let records_dir = dir.join(records);
		tokio::fs::create_dir_all(&records_dir).await?;
		Ok(records_dir.join(format!("{}.json", hex::encode(key))))
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
		let dir = self.network_dir(protocol, network).await?.join(TRANSACTIONS_DIR);
		if !tokio::fs::try_exists(&dir).await? {
			return Ok(Vec::new());
		}

		let mut matching = Vec::new();
		let mut entries = tokio::fs::read_dir(&dir).await?;
		while let Some(entry) = entries.next_entry().await? {
			let path = entry.path();
			if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
				continue;
			}
			let Some(row) = Self::read_json::<TransactionRow>(&path).await? else {
				continue;
			};
			let tx = NormalizedTransaction::try_from(&row)?;
			if predicate(&tx) {
				matching.push(tx);
			}
		}
		matching.sort_by(|a, b| {
			a.block_number
				.cmp(&b.block_number)
				.then_with(|| a.hash.cmp(&b.hash))
		});
		Ok(matching)
	}
}

#[async_trait]
impl SyncCursorStore for FileStore {
	async fn get_cursor(
		&self,
		protocol: Protocol,
		network: &str,
	) -> Result<Option<u64>, RepositoryError> {
		let dir = self.network_dir(protocol, network).await?;
		let cursor: Option<SyncCursor> = Self::read_json(&dir.join(CURSOR_FILE)).await?;
		Ok(cursor.map(|c| c.block_number))
	}

	async fn put_cursor(
		&self,
		protocol: Protocol,
		network: &str,
		block_number: u64,
	) -> Result<(), RepositoryError> {
		let dir = self.network_dir(protocol, network).await?;
		let cursor = SyncCursor::new(protocol, network, block_number);
		let _guard = self.write_lock.lock().await;
		Self::write_json(&dir.join(CURSOR_FILE), &cursor).await
	}
}

#[async_trait]
impl PublicKeyStore for FileStore {
	async fn put_public_key(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
		record: &PublicKeyRecord,
	) -> Result<(), RepositoryError> {
		let dir = self.network_dir(protocol, network).await?;
		let path = Self::record_path(&dir, PUBLIC_KEYS_DIR, address).await?;
		let row = PublicKeyRow::try_from(record)?;

		let _guard = self.write_lock.lock().await;
		Self::write_json(&path, &row).await
	}

	async fn get_public_key(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
	) -> Result<Option<PublicKeyRecord>, RepositoryError> {
		let dir = self.network_dir(protocol, network).await?;
		let path = Self::record_path(&dir, PUBLIC_KEYS_DIR, address).await?;
		Self::read_json::<PublicKeyRow>(&path)
			.await?
			.as_ref()
			.map(PublicKeyRecord::try_from)
			.transpose()
	}
}

#[async_trait]
impl TransactionStore for FileStore {
	async fn put_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
		tx: &NormalizedTransaction,
	) -> Result<(), RepositoryError> {
		let dir = self.network_dir(protocol, network).await?;
		let path = Self::record_path(&dir, TRANSACTIONS_DIR, hash).await?;

		let _guard = self.write_lock.lock().await;
		Self::write_json(&path, &TransactionRow::from(tx)).await
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
impl RawTransactionStore for FileStore {
	async fn put_raw_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
		raw: &[u8],
	) -> Result<(), RepositoryError> {
		let dir = self.network_dir(protocol, network).await?.join(RAW_DIR);
		tokio::fs::create_dir_all(&dir).await?;
		Self::write_atomic(&dir.join(format!("{}.bin", hex::encode(hash))), raw).await
	}

	async fn get_raw_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
	) -> Result<Option<Vec<u8>>, RepositoryError> {
		let path = self
			.network_dir(protocol, network)
			.await?
			.join(RAW_DIR)
			.join(format!("{}.bin", hex::encode(hash)));
		if !tokio::fs::try_exists(&path).await? {
			return Ok(None);
		}
		Ok(Some(tokio::fs::read(&path).await?))
	}
}
