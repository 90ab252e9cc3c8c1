use async_trait::async_trait;

use crate::{models::Protocol, repositories::error::RepositoryError};

/// Persistent sync cursor, one per `(protocol, network)` pair
///
/// The cursor is the number of the last fully processed block.
#[async_trait]
pub trait SyncCursorStore: Send + Sync {
	/// Returns the cursor, `None` when it was never written
	async fn get_cursor(
		&self,
		protocol: Protocol,
		network: &str,
	) -> Result<Option<u64>, RepositoryError>;

	/// Writes the cursor, replacing the previous value
	async fn put_cursor(
		&self,
		protocol: Protocol,
		network: &str,
		block_number: u64,
	) -> Result<(), RepositoryError>;
}
