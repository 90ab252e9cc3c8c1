//! Block and transaction decoders.
//!
//! A block decoder walks the transactions of a block in order and hands each one to the
//! transaction decoder of its protocol. A transaction decoder recovers the sender public key,
//! stores it, builds the [`NormalizedTransaction`](crate::models::NormalizedTransaction) and
//! forwards it through the [`PayloadFilter`]. The first failure aborts the block.

mod error;
mod ethereum;
mod payload;
mod substrate;

use async_trait::async_trait;
use std::sync::Arc;

pub use error::DecodeError;
pub use ethereum::{
	address_from_public_key, chain_id_from_v, recover_public_key, recover_sender, recovery_id,
	signing_hash, signing_payload, EthereumBlockDecoder, EthereumTransactionDecoder,
};
pub use payload::{has_mailchain_prefix, PayloadFilter, MAILCHAIN_PREFIX};
pub use substrate::{
	derive_recipient, derive_sender, split_payload, ss58_address, ExtrinsicSender,
	SubstrateBlockDecoder, SubstrateExtrinsicDecoder, PAYLOAD_MARKER,
};

use crate::{
	models::BlockPayload,
	repositories::{PublicKeyStore, RawTransactionStore, TransactionStore},
};

/// Decodes every transaction of a block
#[async_trait]
pub trait BlockDecoder: Send + Sync {
	/// Decodes the block, stopping at the first failing transaction
	async fn run(&self, block: &BlockPayload) -> Result<(), DecodeError>;
}

/// Stores written by the decoders
#[derive(Clone)]
pub struct DecoderStores {
	pub public_keys: Arc<dyn PublicKeyStore>,
	pub transactions: Arc<dyn TransactionStore>,
	pub raw_transactions: Arc<dyn RawTransactionStore>,
}

impl DecoderStores {
	/// Uses one store for every port
	pub fn from_store<S>(store: Arc<S>) -> Self
	where
		S: PublicKeyStore + TransactionStore + RawTransactionStore + 'static,
	{
		Self {
			public_keys: store.clone(),
			transactions: store.clone(),
			raw_transactions: store,
		}
	}
}
