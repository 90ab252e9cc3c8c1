//! Protocol independent transaction records.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::models::Protocol;

/// A transaction reduced to the fields shared by every supported chain family
///
/// Substrate extrinsics only fill `from`, `to` and `data`; the remaining fields stay empty
/// or zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedTransaction {
	/// Sender address
	pub from: Vec<u8>,
	/// Recipient address, empty for contract creation
	pub to: Vec<u8>,
	/// Application payload
	pub data: Vec<u8>,
	/// Hash of the containing block
	pub block_hash: Vec<u8>,
	/// Transaction hash
	pub hash: Vec<u8>,
	/// Number of the containing block
	pub block_number: u64,
	/// Transferred value
	pub value: U256,
	/// Gas charged for the transaction
	pub gas_used: U256,
	/// Price paid per unit of gas
	pub gas_price: U256,
}

/// Last block processed for a `(protocol, network)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCursor {
	pub protocol: Protocol,
	pub network: String,
	pub block_number: u64,
}

impl SyncCursor {
	pub fn new(protocol: Protocol, network: impl Into<String>, block_number: u64) -> Self {
		Self {
			protocol,
			network: network.into(),
			block_number,
		}
	}
}
