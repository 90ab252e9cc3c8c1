use async_trait::async_trait;

use crate::{
	models::{NormalizedTransaction, Protocol},
	repositories::error::RepositoryError,
};

/// Store of normalized transactions keyed by `(protocol, network, hash)`
#[async_trait]
pub trait TransactionStore: Send + Sync {
	/// Inserts or replaces the transaction stored under `hash`
	async fn put_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
		tx: &NormalizedTransaction,
	) -> Result<(), RepositoryError>;

	/// Transactions sent by `address`, ordered by block number
	async fn get_transactions_by_from(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
	) -> Result<Vec<NormalizedTransaction>, RepositoryError>;

	/// Transactions addressed to `address`, ordered by block number
	async fn get_transactions_by_to(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
	) -> Result<Vec<NormalizedTransaction>, RepositoryError>;
}

/// Store of provider-native transaction objects keyed by `(protocol, network, hash)`
#[async_trait]
pub trait RawTransactionStore: Send + Sync {
	/// Inserts or replaces the raw transaction stored under `hash`
	async fn put_raw_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
		raw: &[u8],
	) -> Result<(), RepositoryError>;

	async fn get_raw_transaction(
		&self,
		protocol: Protocol,
		network: &str,
		hash: &[u8],
	) -> Result<Option<Vec<u8>>, RepositoryError>;
}
