mod block;
mod signing;
mod transaction;

pub use block::EthereumBlockDecoder;
pub use signing::{
	address_from_public_key, chain_id_from_v, recover_public_key, recover_sender, recovery_id,
	signing_hash, signing_payload,
};
pub use transaction::EthereumTransactionDecoder;
