//! Sender public keys recovered from signed transactions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature scheme a public key belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
	Secp256k1,
	Ed25519,
	Sr25519,
}

impl KeyKind {
	/// Name used by the key kind code table
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Secp256k1 => "secp256k1",
			Self::Ed25519 => "ed25519",
			Self::Sr25519 => "sr25519",
		}
	}
}

impl fmt::Display for KeyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Public key of a transaction sender
///
/// Records are keyed by `(protocol, network, address)` and overwritten when the same sender is
/// seen again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyRecord {
	/// Address derived from the key, in the chain's native representation
	pub address: Vec<u8>,
	/// Raw public key bytes
	pub public_key: Vec<u8>,
	/// Signature scheme of the key
	pub key_kind: KeyKind,
	/// Hash of the block the key was seen in
	pub block_hash: Vec<u8>,
	/// Hash of the transaction the key was recovered from
	pub tx_hash: Vec<u8>,
}
