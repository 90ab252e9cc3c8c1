//! Substrate-family block and extrinsic data structures.

mod block;
mod extrinsic;

pub use block::{
	Block as SubstrateBlock, BlockHeader as SubstrateBlockHeader, RpcBlock as SubstrateRpcBlock,
};
pub use extrinsic::{
	Address as SubstrateAddress, Call as ExtrinsicCall, CallArgs, Era, Extrinsic,
	ExtrinsicDecodeError, ExtrinsicSignature,
};

use subxt::utils::H256;

/// Context handed to the Substrate extrinsic decoder
#[derive(Debug, Clone, Copy)]
pub struct SubstrateTxContext<'a> {
	/// Hash of the block the extrinsic was taken from
	pub block_hash: &'a H256,
	/// Number of the block the extrinsic was taken from
	pub block_number: u64,
}
