//! Ethereum block decoder.

use async_trait::async_trait;

use crate::{
	models::{BlockPayload, EthereumTxContext, Protocol, TxContext},
	services::decoder::{
		ethereum::transaction::EthereumTransactionDecoder, BlockDecoder, DecodeError,
	},
};

/// Decodes the legacy transactions of an Ethereum block in order
pub struct EthereumBlockDecoder {
	tx_decoder: EthereumTransactionDecoder,
}

impl EthereumBlockDecoder {
	pub fn new(tx_decoder: EthereumTransactionDecoder) -> Self {
		Self { tx_decoder }
	}
}

#[async_trait]
impl BlockDecoder for EthereumBlockDecoder {
	async fn run(&self, block: &BlockPayload) -> Result<(), DecodeError> {
		let BlockPayload::Ethereum(block) = block else {
			return Err(DecodeError::WrongPayloadType {
				expected: Protocol::Ethereum,
				actual: block.protocol(),
			});
		};

		let context = TxContext::Ethereum(EthereumTxContext { block });
		for tx in block.transactions() {
			// Typed transactions carry a y-parity instead of the legacy `v`
			if !tx.is_legacy() {
				tracing::debug!(hash = %tx.hash(), "Skipping typed transaction");
				continue;
			}
			self.tx_decoder.run(&tx, &context).await?;
		}
		Ok(())
	}
}
