//! Ethereum block data structures.

use alloy::primitives::{B256, U64};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

use super::transaction::{RpcTransaction, Transaction};

/// Block as returned by `eth_getBlockByNumber` with full transaction objects
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
	/// Block number, absent for pending blocks
	#[serde(default)]
	pub number: Option<U64>,
	/// Block hash, absent for pending blocks
	#[serde(default)]
	pub hash: Option<B256>,
	/// Hash of the parent block
	#[serde(default)]
	pub parent_hash: B256,
	/// Transactions in block order
	#[serde(default)]
	pub transactions: Vec<RpcTransaction>,
}

/// Wrapper around [`RpcBlock`] adding lookup helpers
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Block(pub RpcBlock);

impl Block {
	/// Get the block number
	pub fn number(&self) -> Option<u64> {
		self.0.number.map(|n| n.to::<u64>())
	}

	/// Get the block hash, or the zero hash for pending blocks
	pub fn hash(&self) -> B256 {
		self.0.hash.unwrap_or_default()
	}

	/// Transactions of the block in block order
	pub fn transactions(&self) -> impl Iterator<Item = Transaction> + '_ {
		self.0.transactions.iter().cloned().map(Transaction::from)
	}

	/// Whether a transaction with the given hash is part of this block
	pub fn contains_transaction(&self, hash: &B256) -> bool {
		self.0.transactions.iter().any(|tx| &tx.hash == hash)
	}
}

impl From<RpcBlock> for Block {
	fn from(block: RpcBlock) -> Self {
		Self(block)
	}
}

impl Deref for Block {
	type Target = RpcBlock;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
