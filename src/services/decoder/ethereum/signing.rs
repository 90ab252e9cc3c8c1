//! Legacy transaction signing payloads and secp256k1 key recovery.
//!
//! The node only reports the sender address, so the public key is recovered from `(r, s, v)`
//! over the hash the sender signed. That hash is rebuilt from the transaction fields, with
//! the EIP-155 chain id fields appended when `v` encodes a chain id.

use alloy::{
	consensus::{SignableTransaction, TxLegacy},
	primitives::{keccak256, Address, Bytes, Signature, TxKind, B256, U256},
	rlp::{self, Encodable},
};
use secp256k1::{
	ecdsa::{RecoverableSignature, RecoveryId},
	Message, Secp256k1, VerifyOnly,
};
use std::sync::OnceLock;

use crate::{models::EthereumTransaction, services::decoder::DecodeError};

/// `v` offset of pre-EIP-155 signatures
const LEGACY_V_OFFSET: u64 = 27;
/// `v` offset of EIP-155 signatures, before adding `2 * chain_id`
const EIP155_V_OFFSET: u64 = 35;

fn secp() -> &'static Secp256k1<VerifyOnly> {
	static SECP: OnceLock<Secp256k1<VerifyOnly>> = OnceLock::new();
	SECP.get_or_init(Secp256k1::verification_only)
}

fn recovery_failed(msg: impl Into<String>) -> DecodeError {
	DecodeError::SignatureRecoveryFailed(msg.into())
}

/// Chain id encoded in `v`, zero for pre-EIP-155 signatures
pub fn chain_id_from_v(v: U256) -> Result<U256, DecodeError> {
	if v == U256::from(LEGACY_V_OFFSET) || v == U256::from(LEGACY_V_OFFSET + 1) {
		return Ok(U256::ZERO);
	}
	v.checked_sub(U256::from(EIP155_V_OFFSET))
		.map(|n| n / U256::from(2))
		.ok_or_else(|| recovery_failed(format!("v {} does not encode a chain id", v)))
}

/// Recovery id encoded in `v`, either 0 or 1
pub fn recovery_id(v: U256, chain_id: U256) -> Result<u8, DecodeError> {
	let offset = if chain_id.is_zero() {
		Some(U256::ZERO)
	} else {
		chain_id
			.checked_mul(U256::from(2))
			.and_then(|n| n.checked_add(U256::from(8)))
	};

	let id = offset
		.and_then(|offset| v.checked_sub(offset))
		.and_then(|n| n.checked_sub(U256::from(LEGACY_V_OFFSET)));

	match id {
		Some(id) if id < U256::from(2) => Ok(id.to::<u8>()),
		_ => Err(recovery_failed(format!(
			"v {} with chain id {} gives no valid recovery id",
			v, chain_id
		))),
	}
}

/// RLP encoded field list the sender signed
pub fn signing_payload(tx: &EthereumTransaction, chain_id: U256) -> Vec<u8> {
	let gas_price = tx.gas_price();
	let to = tx
		.to()
		.map(|address| Bytes::copy_from_slice(address.as_slice()))
		.unwrap_or_default();
	let empty = Bytes::new();

	let mut fields: Vec<&dyn Encodable> =
		vec![&tx.nonce, &gas_price, &tx.gas, &to, &tx.value, tx.input()];
	if !chain_id.is_zero() {
		fields.extend([&chain_id as &dyn Encodable, &empty, &empty]);
	}

	let mut out = Vec::new();
	rlp::encode_list::<_, dyn Encodable>(&fields, &mut out);
	out
}

/// Keccak-256 of the signing payload
pub fn signing_hash(tx: &EthereumTransaction, chain_id: U256) -> B256 {
	keccak256(signing_payload(tx, chain_id))
}

/// 65 byte `r || s || recovery id` signature
fn signature_bytes(r: U256, s: U256, recovery_id: u8) -> [u8; 65] {
	let mut signature = [0u8; 65];
	signature[..32].copy_from_slice(&r.to_be_bytes::<32>());
	signature[32..64].copy_from_slice(&s.to_be_bytes::<32>());
	signature[64] = recovery_id;
	signature
}

/// Recovers the uncompressed public key, without its `0x04` prefix
pub fn recover_public_key(
	hash: &B256,
	r: U256,
	s: U256,
	recovery_id: u8,
) -> Result<[u8; 64], DecodeError> {
	let signature = signature_bytes(r, s, recovery_id);

	let recid = RecoveryId::from_i32(i32::from(signature[64]))
		.map_err(|e| recovery_failed(format!("invalid recovery id: {}", e)))?;
	let recoverable = RecoverableSignature::from_compact(&signature[..64], recid)
		.map_err(|e| recovery_failed(format!("invalid signature: {}", e)))?;
	let message = Message::from_digest_slice(hash.as_slice())
		.map_err(|e| recovery_failed(format!("invalid message: {}", e)))?;

	let key = secp()
		.recover_ecdsa(&message, &recoverable)
		.map_err(|e| recovery_failed(e.to_string()))?;

	let mut public_key = [0u8; 64];
	public_key.copy_from_slice(&key.serialize_uncompressed()[1..]);
	Ok(public_key)
}

/// Ethereum address of an uncompressed public key
pub fn address_from_public_key(public_key: &[u8; 64]) -> Address {
	Address::from_slice(&keccak256(public_key)[12..])
}

/// Sender address as recovered by the alloy legacy transaction
pub fn recover_sender(
	tx: &EthereumTransaction,
	chain_id: U256,
	r: U256,
	s: U256,
	recovery_id: u8,
) -> Result<Address, DecodeError> {
	let out_of_range = |field: &str| recovery_failed(format!("{} out of range", field));

	let legacy = TxLegacy {
		chain_id: if chain_id.is_zero() {
			None
		} else {
			Some(u64::try_from(chain_id).map_err(|_| out_of_range("chain id"))?)
		},
		nonce: u64::try_from(tx.nonce).map_err(|_| out_of_range("nonce"))?,
		gas_price: u128::try_from(tx.gas_price()).map_err(|_| out_of_range("gas price"))?,
		gas_limit: u64::try_from(tx.gas).map_err(|_| out_of_range("gas"))?,
		to: tx.to().map(|to| TxKind::Call(*to)).unwrap_or(TxKind::Create),
		value: tx.value,
		input: tx.input().clone(),
	};

	Signature::new(r, s, recovery_id == 1)
		.recover_address_from_prehash(&legacy.signature_hash())
		.map_err(|e| recovery_failed(e.to_string()))
}
