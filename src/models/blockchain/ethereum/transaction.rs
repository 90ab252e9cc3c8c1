//! Ethereum transaction data structures.

use std::ops::Deref;

use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// Transaction object as returned inside `eth_getBlockByNumber(_, true)`
///
/// The signature components are kept as reported by the node, including the raw `v`, so the
/// signed payload can be rebuilt exactly. Fields not modelled here are kept in `other` and
/// serialized back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
	/// Transaction hash
	pub hash: B256,
	/// Sender nonce
	pub nonce: U256,
	/// Hash of the containing block
	#[serde(default)]
	pub block_hash: Option<B256>,
	/// Number of the containing block
	#[serde(default)]
	pub block_number: Option<U64>,
	/// Sender address as reported by the node
	#[serde(default)]
	pub from: Option<Address>,
	/// Recipient, `None` for contract creation
	#[serde(default)]
	pub to: Option<Address>,
	/// Transferred value in wei
	pub value: U256,
	/// Gas price, absent for fee-market transactions
	#[serde(default)]
	pub gas_price: Option<U256>,
	/// Gas limit
	pub gas: U256,
	/// Call data
	#[serde(default)]
	pub input: Bytes,
	/// Signature `v`, including the EIP-155 chain id encoding
	#[serde(default)]
	pub v: U256,
	/// Signature `r`
	#[serde(default)]
	pub r: U256,
	/// Signature `s`
	#[serde(default)]
	pub s: U256,
	/// EIP-2718 transaction type, absent or zero for legacy transactions
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub transaction_type: Option<U64>,
	/// Remaining provider fields
	#[serde(flatten)]
	pub other: serde_json::Map<String, serde_json::Value>,
}

/// Wrapper around [`RpcTransaction`] with accessors used by the decoder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction(pub RpcTransaction);

impl Transaction {
	/// Get the transaction hash
	pub fn hash(&self) -> &B256 {
		&self.0.hash
	}

	/// Get the raw signature components `(r, s, v)`
	pub fn signature(&self) -> (U256, U256, U256) {
		(self.0.r, self.0.s, self.0.v)
	}

	/// Get the recipient address (None for contract creation)
	pub fn to(&self) -> Option<&Address> {
		self.0.to.as_ref()
	}

	/// Get the call data
	pub fn input(&self) -> &Bytes {
		&self.0.input
	}

	/// Get the gas price, zero when the node did not report one
	pub fn gas_price(&self) -> U256 {
		self.0.gas_price.unwrap_or_default()
	}

	/// Whether the transaction uses the pre-EIP-2718 legacy encoding
	pub fn is_legacy(&self) -> bool {
		self.0.transaction_type.is_none_or(|t| t.is_zero())
	}

	/// The provider-native JSON object, as persisted in the raw transaction store
	pub fn to_raw_json(&self) -> Result<Vec<u8>, serde_json::Error> {
		serde_json::to_vec(&self.0)
	}
}

impl From<RpcTransaction> for Transaction {
	fn from(tx: RpcTransaction) -> Self {
		Self(tx)
	}
}

impl Deref for Transaction {
	type Target = RpcTransaction;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
