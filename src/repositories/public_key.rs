use async_trait::async_trait;

use crate::{
	models::{Protocol, PublicKeyRecord},
	repositories::error::RepositoryError,
};

/// Store of sender public keys keyed by `(protocol, network, address)`
#[async_trait]
pub trait PublicKeyStore: Send + Sync {
	/// Inserts or replaces the record of `address`
	async fn put_public_key(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
		record: &PublicKeyRecord,
	) -> Result<(), RepositoryError>;

	async fn get_public_key(
		&self,
		protocol: Protocol,
		network: &str,
		address: &[u8],
	) -> Result<Option<PublicKeyRecord>, RepositoryError>;
}
