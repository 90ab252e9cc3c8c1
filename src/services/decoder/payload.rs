//! Mailchain payload filter.
//!
//! Only transactions whose data starts with the `mailchain` magic prefix are persisted, as a
//! normalized transaction and its raw counterpart. Both decoders route every decoded
//! transaction through the same filter.

use std::sync::Arc;

use crate::{
	models::{NormalizedTransaction, Protocol},
	repositories::{RawTransactionStore, TransactionStore},
	services::decoder::DecodeError,
};

/// Magic prefix of application payloads
pub const MAILCHAIN_PREFIX: &[u8] = b"mailchain";

/// Whether `data` carries a mailchain payload
pub fn has_mailchain_prefix(data: &[u8]) -> bool {
	data.starts_with(MAILCHAIN_PREFIX)
}

/// Persists transactions carrying a mailchain payload
#[derive(Clone)]
pub struct PayloadFilter {
	protocol: Protocol,
	network: String,
	transactions: Arc<dyn TransactionStore>,
	raw_transactions: Arc<dyn RawTransactionStore>,
}

impl PayloadFilter {
	pub fn new(
		protocol: Protocol,
		network: impl Into<String>,
		transactions: Arc<dyn TransactionStore>,
		raw_transactions: Arc<dyn RawTransactionStore>,
	) -> Self {
		Self {
			protocol,
			network: network.into(),
			transactions,
			raw_transactions,
		}
	}

	/// Stores `tx` and `raw` under `hash` when the payload matches
	///
	/// Returns whether the transaction was stored.
	pub async fn apply(
		&self,
		hash: &[u8],
		tx: &NormalizedTransaction,
		raw: &[u8],
	) -> Result<bool, DecodeError> {
		if !has_mailchain_prefix(&tx.data) {
			return Ok(false);
		}

		// raw first: a normalized row must never exist without its raw counterpart
		self.raw_transactions
			.put_raw_transaction(self.protocol, &self.network, hash, raw)
			.await?;
		self.transactions
			.put_transaction(self.protocol, &self.network, hash, tx)
			.await?;

		tracing::info!(
			protocol = %self.protocol,
			network = %self.network,
			hash = %hex::encode(hash),
			"Stored mailchain transaction"
		);
		Ok(true)
	}
}
