//! Substrate extrinsic decoder.
//!
//! Mailchain extrinsics carry their payload inside the call arguments. The arguments are
//! split on the hex encoding of `mailchain`: everything before the marker is the info segment,
//! whose bytes `[1, 33)` hold the recipient; the marker and everything after it is the hex
//! encoded payload.

use sp_core::hashing::blake2_256;

use crate::{
	models::{
		ss58_prefix, CodeError, Extrinsic, ExtrinsicDecodeError, NormalizedTransaction, Protocol,
		PublicKeyRecord, TxContext,
	},
	services::decoder::{
		substrate::address::{derive_recipient, derive_sender, ss58_address},
		DecodeError, DecoderStores, PayloadFilter,
	},
};

/// Hex encoding of `mailchain`, marking the start of the payload
pub const PAYLOAD_MARKER: &[u8] = b"6d61696c636861696e";

/// Splits call arguments into the info segment and the hex encoded payload
///
/// The payload segment starts with the marker itself; it is empty when the marker is absent.
pub fn split_payload(args: &[u8]) -> (&[u8], &[u8]) {
	match args
		.windows(PAYLOAD_MARKER.len())
		.position(|window| window == PAYLOAD_MARKER)
	{
		Some(position) => args.split_at(position),
		None => (args, &[]),
	}
}

/// Decodes signed extrinsics, stores the sender public key and applies the payload filter
pub struct SubstrateExtrinsicDecoder {
	network: String,
	ss58_prefix: u16,
	stores: DecoderStores,
	filter: PayloadFilter,
}

impl SubstrateExtrinsicDecoder {
	/// Creates a decoder for `network`, which needs a registered SS58 prefix
	pub fn new(network: impl Into<String>, stores: DecoderStores) -> Result<Self, CodeError> {
		let network = network.into();
		let prefix = ss58_prefix(&network)?;
		let filter = PayloadFilter::new(
			Protocol::Substrate,
			network.clone(),
			stores.transactions.clone(),
			stores.raw_transactions.clone(),
		);
		Ok(Self {
			network,
			ss58_prefix: prefix,
			stores,
			filter,
		})
	}

	/// Decodes one hex encoded extrinsic
	///
	/// Returns `None` for unsigned extrinsics, which have no sender to index.
	pub async fn run(
		&self,
		encoded: &str,
		context: &TxContext<'_>,
	) -> Result<Option<NormalizedTransaction>, DecodeError> {
		let TxContext::Substrate(context) = context else {
			return Err(DecodeError::WrongPayloadType {
				expected: Protocol::Substrate,
				actual: context.protocol(),
			});
		};

		let bytes = hex::decode(encoded.trim_start_matches("0x")).map_err(|e| {
			DecodeError::CodecEncodeFailed(format!("invalid extrinsic hex: {}", e))
		})?;
		let extrinsic = Extrinsic::decode_envelope(&bytes).map_err(|e| match e {
			ExtrinsicDecodeError::Codec(error) => {
				DecodeError::CodecEncodeFailed(error.to_string())
			}
			ExtrinsicDecodeError::UnsupportedSignature(variant) => {
				DecodeError::UnsupportedSignatureAlgorithm(format!(
					"signature variant {}",
					variant
				))
			}
		})?;

		let Some(signature) = &extrinsic.signature else {
			tracing::debug!(
				block_number = context.block_number,
				"Skipping unsigned extrinsic"
			);
			return Ok(None);
		};

		let args = extrinsic.encoded_args();
		let (info, payload) = split_payload(&args);
		let data = hex::decode(payload)
			.map_err(|e| DecodeError::InvalidPayloadEncoding(e.to_string()))?;

		let sender = derive_sender(signature)?;
		let from = ss58_address(&sender.account, self.ss58_prefix);
		let to = derive_recipient(info, &data, self.ss58_prefix)?;

		let record = NormalizedTransaction {
			from: from.clone().into_bytes(),
			to: to.into_bytes(),
			data,
			..Default::default()
		};

		let hash = blake2_256(&bytes);
		self.stores
			.public_keys
			.put_public_key(
				Protocol::Substrate,
				&self.network,
				from.as_bytes(),
				&PublicKeyRecord {
					address: from.clone().into_bytes(),
					public_key: sender.public_key,
					key_kind: sender.key_kind,
					block_hash: context.block_hash.as_bytes().to_vec(),
					tx_hash: hash.to_vec(),
				},
			)
			.await?;

		self.filter.apply(&hash, &record, &bytes).await?;

		tracing::debug!(
			hash = %hex::encode(hash),
			from = %from,
			block_number = context.block_number,
			"Decoded extrinsic"
		);
		Ok(Some(record))
	}
}
