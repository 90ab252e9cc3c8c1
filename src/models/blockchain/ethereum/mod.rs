//! Ethereum-family block and transaction data structures.

mod block;
mod transaction;

pub use block::{Block as EthereumBlock, RpcBlock as EthereumRpcBlock};
pub use transaction::{
	RpcTransaction as EthereumRpcTransaction, Transaction as EthereumTransaction,
};

/// Context handed to the Ethereum transaction decoder
#[derive(Debug, Clone, Copy)]
pub struct EthereumTxContext<'a> {
	/// Block the transaction was taken from
	pub block: &'a EthereumBlock,
}
