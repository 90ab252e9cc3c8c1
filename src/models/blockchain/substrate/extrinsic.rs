//! SCALE encoded extrinsics.
//!
//! The layout follows the version 4 extrinsic format: a compact length prefix, a version byte
//! whose top bit flags a signed extrinsic, the optional signature block (signer, signature,
//! era, nonce, tip) and finally the call index followed by the call arguments. Call arguments
//! are not described by the encoding itself, so they are kept as the raw tail of the
//! extrinsic.

use parity_scale_codec::{Compact, Decode, Encode, Error, Input, Output};
use subxt::utils::{AccountId32, MultiAddress, MultiSignature};

/// Bit of the version byte marking a signed extrinsic
pub const SIGNED_FLAG: u8 = 0b1000_0000;

/// Variant indexes of the signature schemes `MultiSignature` knows about
const KNOWN_SIGNATURE_VARIANTS: [u8; 3] = [0, 1, 2];

/// Failure to decode an extrinsic envelope
#[derive(Debug, thiserror::Error)]
pub enum ExtrinsicDecodeError {
	/// The bytes are not a valid SCALE extrinsic
	#[error("invalid extrinsic encoding: {0}")]
	Codec(#[from] Error),

	/// The signature uses a scheme outside of ed25519, sr25519 and ecdsa
	#[error("unknown signature variant {0}")]
	UnsupportedSignature(u8),
}

/// Address type of the signer
pub type Address = MultiAddress<AccountId32, u32>;

/// Transaction mortality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
	/// Valid forever
	Immortal,
	/// Valid for a period, kept in its two byte encoded form
	Mortal(u8, u8),
}

impl Encode for Era {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		match self {
			Self::Immortal => dest.push_byte(0),
			Self::Mortal(first, second) => {
				dest.push_byte(*first);
				dest.push_byte(*second);
			}
		}
	}
}

impl Decode for Era {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		let first = input.read_byte()?;
		if first == 0 {
			return Ok(Self::Immortal);
		}
		Ok(Self::Mortal(first, input.read_byte()?))
	}
}

/// Signature block of a signed extrinsic
#[derive(Debug, Clone, PartialEq, Eq, Encode)]
pub struct ExtrinsicSignature {
	/// Account that signed the extrinsic
	pub signer: Address,
	/// Signature over the extrinsic payload
	pub signature: MultiSignature,
	/// Mortality of the extrinsic
	pub era: Era,
	/// Signer nonce
	#[codec(compact)]
	pub nonce: u64,
	/// Tip paid to the block author
	#[codec(compact)]
	pub tip: u128,
}

/// Raw call arguments, everything after the call index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallArgs(pub Vec<u8>);

impl Encode for CallArgs {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		dest.write(&self.0);
	}

	fn size_hint(&self) -> usize {
		self.0.len()
	}
}

impl Decode for CallArgs {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		let len = input
			.remaining_len()?
			.ok_or_else(|| Error::from("call arguments of unknown length"))?;
		let mut args = vec![0u8; len];
		input.read(&mut args)?;
		Ok(Self(args))
	}
}

/// Call carried by an extrinsic
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Call {
	/// Pallet index and call index within the pallet
	pub call_index: [u8; 2],
	/// Encoded call arguments
	pub args: CallArgs,
}

/// A decoded extrinsic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extrinsic {
	/// Version byte, including the signed flag
	pub version: u8,
	/// Signature block, present for signed extrinsics
	pub signature: Option<ExtrinsicSignature>,
	/// The dispatched call
	pub method: Call,
}

impl Extrinsic {
	/// Re-encodes the call arguments into a flat byte stream
	pub fn encoded_args(&self) -> Vec<u8> {
		self.method.args.encode()
	}
}

impl Encode for Extrinsic {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		let mut body = vec![self.version];
		if let Some(signature) = &self.signature {
			signature.encode_to(&mut body);
		}
		self.method.encode_to(&mut body);
		body.encode_to(dest);
	}
}

impl Extrinsic {
	/// Decodes a length prefixed extrinsic
	///
	/// Unlike the [`Decode`] implementation, an unknown signature scheme is reported as
	/// [`ExtrinsicDecodeError::UnsupportedSignature`] instead of a generic codec error.
	pub fn decode_envelope(bytes: &[u8]) -> Result<Self, ExtrinsicDecodeError> {
		let mut input = bytes;
		Self::decode_from(&mut input)
	}

	fn decode_from<I: Input>(input: &mut I) -> Result<Self, ExtrinsicDecodeError> {
		let body: Vec<u8> = Decode::decode(input)?;
		let mut body = &body[..];

		let version = body.read_byte()?;
		let signature = if version & SIGNED_FLAG != 0 {
			Some(decode_signature(&mut body)?)
		} else {
			None
		};
		let method = Call::decode(&mut body)?;

		Ok(Self {
			version,
			signature,
			method,
		})
	}
}

fn decode_signature(body: &mut &[u8]) -> Result<ExtrinsicSignature, ExtrinsicDecodeError> {
	let signer = Address::decode(body)?;

	let variant = *body
		.first()
		.ok_or_else(|| Error::from("missing signature variant"))?;
	if !KNOWN_SIGNATURE_VARIANTS.contains(&variant) {
		return Err(ExtrinsicDecodeError::UnsupportedSignature(variant));
	}
	let signature = MultiSignature::decode(body)?;

	let era = Era::decode(body)?;
	let nonce = Compact::<u64>::decode(body)?.0;
	let tip = Compact::<u128>::decode(body)?.0;

	Ok(ExtrinsicSignature {
		signer,
		signature,
		era,
		nonce,
		tip,
	})
}

impl Decode for Extrinsic {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		Self::decode_from(input).map_err(|e| match e {
			ExtrinsicDecodeError::Codec(error) => error,
			ExtrinsicDecodeError::UnsupportedSignature(_) => {
				Error::from("unknown signature variant")
			}
		})
	}
}
