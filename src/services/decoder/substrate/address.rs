//! Sender and recipient derivation for extrinsics.

use sp_core::{
	crypto::{AccountId32, Ss58AddressFormat, Ss58Codec},
	hashing::blake2_256,
};
use subxt::utils::{MultiAddress, MultiSignature};

use crate::{
	models::{ExtrinsicSignature, KeyKind},
	services::decoder::DecodeError,
};

/// Sender key material taken from an extrinsic signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicSender {
	/// 32 byte account the SS58 address is built from
	pub account: [u8; 32],
	/// Public key as stored in the public key record
	pub public_key: Vec<u8>,
	pub key_kind: KeyKind,
}

/// SS58 address of a 32 byte account with the given network prefix
pub fn ss58_address(account: &[u8; 32], prefix: u16) -> String {
	AccountId32::new(*account).to_ss58check_with_version(Ss58AddressFormat::custom(prefix))
}

/// Derives the sender from the signature variant
///
/// - ECDSA: the signature bytes are read as a secp256k1 public key; the account is the
///   blake2-256 hash of its compressed form
/// - Ed25519: the signature bytes are read as a keypair; the public half is the trailing
///   32 bytes
/// - Sr25519: the signer account id
///
/// Signers that are not plain account ids are rejected.
pub fn derive_sender(signature: &ExtrinsicSignature) -> Result<ExtrinsicSender, DecodeError> {
	let MultiAddress::Id(signer) = &signature.signer else {
		return Err(DecodeError::AddressDerivationFailed(
			"signer is not an account id".to_string(),
		));
	};

	match &signature.signature {
		MultiSignature::Ecdsa(bytes) => {
			let key = secp256k1::PublicKey::from_slice(bytes).map_err(|e| {
				DecodeError::AddressDerivationFailed(format!("invalid ecdsa public key: {}", e))
			})?;
			let compressed = key.serialize();
			Ok(ExtrinsicSender {
				account: blake2_256(&compressed),
				public_key: compressed.to_vec(),
				key_kind: KeyKind::Secp256k1,
			})
		}
		MultiSignature::Ed25519(bytes) => {
			let mut public_key = [0u8; 32];
			public_key.copy_from_slice(&bytes[32..]);
			Ok(ExtrinsicSender {
				account: public_key,
				public_key: public_key.to_vec(),
				key_kind: KeyKind::Ed25519,
			})
		}
		MultiSignature::Sr25519(_) => Ok(ExtrinsicSender {
			account: signer.0,
			public_key: signer.0.to_vec(),
			key_kind: KeyKind::Sr25519,
		}),
	}
}

/// Recipient address, read from bytes `[1, 33)` of the info segment
///
/// A short info segment is only accepted when the extrinsic carries no payload.
pub fn derive_recipient(info: &[u8], data: &[u8], prefix: u16) -> Result<String, DecodeError> {
	match info.get(1..33) {
		Some(bytes) => {
			let mut account = [0u8; 32];
			account.copy_from_slice(bytes);
			Ok(ss58_address(&account, prefix))
		}
		None if data.is_empty() => Ok(String::new()),
		None => Err(DecodeError::AddressDerivationFailed(format!(
			"info segment of {} bytes holds no recipient",
			info.len()
		))),
	}
}
