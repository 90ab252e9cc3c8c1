//! Storage representation of records.
//!
//! Big integers are stored as minimal big-endian bytes, empty for zero, so values wider than
//! 64 bits survive a round trip unchanged. Byte fields are hex encoded in the JSON rows and key
//! kinds are stored through the key kind code table.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{
	models::{key_kind_code, KeyKind, NormalizedTransaction, PublicKeyRecord},
	repositories::error::RepositoryError,
};

/// Minimal big-endian bytes of `value`, empty for zero
pub fn u256_to_bytes(value: &U256) -> Vec<u8> {
	let bytes = value.to_be_bytes::<32>();
	let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
	bytes[start..].to_vec()
}

/// Reads a value written by [`u256_to_bytes`]
pub fn u256_from_bytes(bytes: &[u8]) -> Result<U256, RepositoryError> {
	if bytes.is_empty() {
		return Ok(U256::ZERO);
	}
	U256::try_from_be_slice(bytes).ok_or_else(|| {
		RepositoryError::load_error(format!("integer of {} bytes overflows 256 bits", bytes.len()))
	})
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, RepositoryError> {
	hex::decode(value)
		.map_err(|e| RepositoryError::load_error(format!("invalid {} bytes: {}", field, e)))
}

/// JSON row of a [`NormalizedTransaction`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRow {
	pub from: String,
	pub to: String,
	pub data: String,
	pub block_hash: String,
	pub hash: String,
	pub block_number: u64,
	pub value: String,
	pub gas_used: String,
	pub gas_price: String,
}

impl From<&NormalizedTransaction> for TransactionRow {
	fn from(tx: &NormalizedTransaction) -> Self {
		Self {
			from: hex::encode(&tx.from),
			to: hex::encode(&tx.to),
			data: hex::encode(&tx.data),
			block_hash: hex::encode(&tx.block_hash),
			hash: hex::encode(&tx.hash),
			block_number: tx.block_number,
			value: hex::encode(u256_to_bytes(&tx.value)),
			gas_used: hex::encode(u256_to_bytes(&tx.gas_used)),
			gas_price: hex::encode(u256_to_bytes(&tx.gas_price)),
		}
	}
}

impl TryFrom<&TransactionRow> for NormalizedTransaction {
	type Error = RepositoryError;

	fn try_from(row: &TransactionRow) -> Result<Self, Self::Error> {
		Ok(Self {
			from: decode_hex("from", &row.from)?,
			to: decode_hex("to", &row.to)?,
			data: decode_hex("data", &row.data)?,
			block_hash: decode_hex("block_hash", &row.block_hash)?,
			hash: decode_hex("hash", &row.hash)?,
			block_number: row.block_number,
			value: u256_from_bytes(&decode_hex("value", &row.value)?)?,
			gas_used: u256_from_bytes(&decode_hex("gas_used", &row.gas_used)?)?,
			gas_price: u256_from_bytes(&decode_hex("gas_price", &row.gas_price)?)?,
		})
	}
}

/// JSON row of a [`PublicKeyRecord`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicKeyRow {
	pub address: String,
	pub public_key: String,
	pub key_kind: u8,
	pub block_hash: String,
	pub tx_hash: String,
}

impl TryFrom<&PublicKeyRecord> for PublicKeyRow {
	type Error = RepositoryError;

	fn try_from(record: &PublicKeyRecord) -> Result<Self, Self::Error> {
		Ok(Self {
			address: hex::encode(&record.address),
			public_key: hex::encode(&record.public_key),
			key_kind: key_kind_code(record.key_kind)?,
			block_hash: hex::encode(&record.block_hash),
			tx_hash: hex::encode(&record.tx_hash),
		})
	}
}

impl TryFrom<&PublicKeyRow> for PublicKeyRecord {
	type Error = RepositoryError;

	fn try_from(row: &PublicKeyRow) -> Result<Self, Self::Error> {
		let key_kind = [KeyKind::Secp256k1, KeyKind::Ed25519, KeyKind::Sr25519]
			.into_iter()
			.find(|kind| key_kind_code(*kind).ok() == Some(row.key_kind))
			.ok_or_else(|| {
				RepositoryError::load_error(format!("unknown key kind code {}", row.key_kind))
			})?;

		Ok(Self {
			address: decode_hex("address", &row.address)?,
			public_key: decode_hex("public_key", &row.public_key)?,
			key_kind,
			block_hash: decode_hex("block_hash", &row.block_hash)?,
			tx_hash: decode_hex("tx_hash", &row.tx_hash)?,
		})
	}
}
