//! Substrate block decoder.

use async_trait::async_trait;

use crate::{
	models::{BlockPayload, Protocol, SubstrateTxContext, TxContext},
	services::decoder::{
		substrate::extrinsic::SubstrateExtrinsicDecoder, BlockDecoder, DecodeError,
	},
};

/// Decodes the extrinsics of a Substrate block in order
pub struct SubstrateBlockDecoder {
	extrinsic_decoder: SubstrateExtrinsicDecoder,
}

impl SubstrateBlockDecoder {
	pub fn new(extrinsic_decoder: SubstrateExtrinsicDecoder) -> Self {
		Self { extrinsic_decoder }
	}
}

#[async_trait]
impl BlockDecoder for SubstrateBlockDecoder {
	async fn run(&self, block: &BlockPayload) -> Result<(), DecodeError> {
		let BlockPayload::Substrate(block) = block else {
			return Err(DecodeError::WrongPayloadType {
				expected: Protocol::Substrate,
				actual: block.protocol(),
			});
		};

		let context = TxContext::Substrate(SubstrateTxContext {
			block_hash: &block.hash,
			block_number: block.number().unwrap_or_default(),
		});
		for extrinsic in block.extrinsics() {
			self.extrinsic_decoder.run(extrinsic, &context).await?;
		}
		Ok(())
	}
}
