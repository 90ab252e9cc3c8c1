//! Domain models and data structures for chain indexing.
//!
//! - `blockchain`: protocol-specific block, transaction and extrinsic payloads
//! - `config`: indexer configuration
//! - `core`: normalized records shared by every protocol and the storage code tables

mod blockchain;
mod config;
mod core;

pub use blockchain::{BlockPayload, Protocol, TxContext};

pub use blockchain::ethereum::{
	EthereumBlock, EthereumRpcBlock, EthereumRpcTransaction, EthereumTransaction,
	EthereumTxContext,
};

pub use blockchain::substrate::{
	CallArgs, Era, Extrinsic, ExtrinsicCall, ExtrinsicDecodeError, ExtrinsicSignature,
	SubstrateAddress, SubstrateBlock, SubstrateBlockHeader, SubstrateRpcBlock,
	SubstrateTxContext,
};

pub use config::{ConfigError, IndexerConfig, RetrySettings, ENV_DATA_DIR, ENV_RPC_ADDRESS};

pub use core::{
	key_kind_code, network_code, protocol_code, ss58_prefix, CodeError, KeyKind,
	NormalizedTransaction, PublicKeyRecord, SyncCursor,
};
