//! Substrate block data structures.
//!
//! `chain_getBlock` does not include the block hash in its response, so the client pairs the
//! RPC block with the hash it resolved through `chain_getBlockHash`.

use serde::{Deserialize, Serialize};
use subxt::utils::H256;

/// Substrate block header as returned by `chain_getBlock` and `chain_getHeader`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
	/// Hash of the parent block
	pub parent_hash: String,
	/// Block number in hexadecimal format
	pub number: String,
	/// State root hash
	#[serde(default)]
	pub state_root: String,
	/// Extrinsics root hash
	#[serde(default)]
	pub extrinsics_root: String,
}

impl BlockHeader {
	/// Block number as a decimal value
	pub fn number(&self) -> Option<u64> {
		u64::from_str_radix(self.number.trim_start_matches("0x"), 16).ok()
	}
}

/// Block body as returned under the `block` key of `chain_getBlock`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RpcBlock {
	/// Block header
	pub header: BlockHeader,
	/// SCALE encoded extrinsics, hex encoded with a `0x` prefix
	pub extrinsics: Vec<String>,
}

/// A Substrate block together with its hash
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Block {
	/// Block hash
	pub hash: H256,
	/// Header and extrinsics
	pub block: RpcBlock,
}

impl Block {
	/// Creates a block from its hash and RPC body
	pub fn new(hash: H256, block: RpcBlock) -> Self {
		Self { hash, block }
	}

	/// Block number as a decimal value
	pub fn number(&self) -> Option<u64> {
		self.block.header.number()
	}

	/// Encoded extrinsics in block order
	pub fn extrinsics(&self) -> &[String] {
		&self.block.extrinsics
	}
}
