//! Test fixtures: signed transactions, extrinsics and the blocks carrying them.

use alloy::primitives::{keccak256, Address, Bytes, B256, U256, U64};
use parity_scale_codec::Encode;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use subxt::utils::{AccountId32, MultiAddress, MultiSignature, H256};

use chain_key_indexer::{
	models::{
		BlockPayload, CallArgs, Era, EthereumBlock, EthereumRpcBlock, EthereumRpcTransaction,
		EthereumTransaction, Extrinsic, ExtrinsicCall, ExtrinsicSignature, SubstrateAddress,
		SubstrateBlock, SubstrateBlockHeader, SubstrateRpcBlock,
	},
	services::decoder::{address_from_public_key, signing_hash},
};

pub const ETHEREUM_BLOCK_HASH: B256 = B256::repeat_byte(0xbb);
pub const SUBSTRATE_BLOCK_HASH: H256 = H256::repeat_byte(0xcc);

/// Uncompressed public key of `secret`, without the `0x04` prefix
pub fn public_key_of(secret: [u8; 32]) -> [u8; 64] {
	let secret = SecretKey::from_slice(&secret).unwrap();
	let key = PublicKey::from_secret_key(&Secp256k1::new(), &secret);
	key.serialize_uncompressed()[1..].try_into().unwrap()
}

pub fn address_of(secret: [u8; 32]) -> Address {
	address_from_public_key(&public_key_of(secret))
}

/// Legacy transaction signed by `secret`, EIP-155 style unless `chain_id` is zero
pub fn signed_legacy_tx(
	secret: [u8; 32],
	chain_id: u64,
	nonce: u64,
	input: &[u8],
) -> EthereumTransaction {
	let mut tx = EthereumTransaction::from(EthereumRpcTransaction {
		nonce: U256::from(nonce),
		gas_price: Some(U256::from(20_000_000_000u64)),
		gas: U256::from(21_000),
		to: Some(Address::repeat_byte(0x35)),
		value: U256::from(1_000u64),
		input: Bytes::copy_from_slice(input),
		..Default::default()
	});

	let hash = signing_hash(&tx, U256::from(chain_id));
	let message = Message::from_digest_slice(hash.as_slice()).unwrap();
	let secret_key = SecretKey::from_slice(&secret).unwrap();
	let (id, compact) = Secp256k1::new()
		.sign_ecdsa_recoverable(&message, &secret_key)
		.serialize_compact();

	let v_offset = if chain_id == 0 { 27 } else { 35 + 2 * chain_id };
	tx.0.r = U256::from_be_slice(&compact[..32]);
	tx.0.s = U256::from_be_slice(&compact[32..]);
	tx.0.v = U256::from(v_offset + id.to_i32() as u64);
	tx.0.hash = keccak256([&nonce.to_be_bytes()[..], input].concat());
	tx.0.from = Some(address_of(secret));
	tx
}

pub fn ethereum_block(number: u64, transactions: Vec<EthereumTransaction>) -> EthereumBlock {
	EthereumBlock::from(EthereumRpcBlock {
		number: Some(U64::from(number)),
		hash: Some(ETHEREUM_BLOCK_HASH),
		parent_hash: B256::ZERO,
		transactions: transactions.into_iter().map(|tx| tx.0).collect(),
	})
}

pub fn ethereum_payload(number: u64, transactions: Vec<EthereumTransaction>) -> BlockPayload {
	BlockPayload::Ethereum(Box::new(ethereum_block(number, transactions)))
}

/// Call arguments of a mailchain extrinsic: a one byte prefix, the recipient and the payload
pub fn mailchain_args(recipient: [u8; 32], message: &[u8]) -> Vec<u8> {
	let mut args = vec![0x00];
	args.extend_from_slice(&recipient);
	args.extend_from_slice(hex::encode([&b"mailchain"[..], message].concat()).as_bytes());
	args
}

pub fn extrinsic_signature(signer: SubstrateAddress, signature: MultiSignature) -> ExtrinsicSignature {
	ExtrinsicSignature {
		signer,
		signature,
		era: Era::Immortal,
		nonce: 0,
		tip: 0,
	}
}

/// Hex encoded signed extrinsic
pub fn signed_extrinsic(signature: ExtrinsicSignature, args: Vec<u8>) -> String {
	let extrinsic = Extrinsic {
		version: 0x84,
		signature: Some(signature),
		method: ExtrinsicCall {
			call_index: [6, 0],
			args: CallArgs(args),
		},
	};
	format!("0x{}", hex::encode(extrinsic.encode()))
}

pub fn sr25519_extrinsic(signer: [u8; 32], args: Vec<u8>) -> String {
	signed_extrinsic(
		extrinsic_signature(
			MultiAddress::Id(AccountId32(signer)),
			MultiSignature::Sr25519([0x5a; 64]),
		),
		args,
	)
}

/// The timestamp inherent every Substrate block starts with
pub const UNSIGNED_TIMESTAMP: &str = "0x280402000b50a1b2c37201";

pub fn substrate_block(number: u64, extrinsics: Vec<String>) -> SubstrateBlock {
	SubstrateBlock::new(
		SUBSTRATE_BLOCK_HASH,
		SubstrateRpcBlock {
			header: SubstrateBlockHeader {
				number: format!("0x{:x}", number),
				..Default::default()
			},
			extrinsics,
		},
	)
}

pub fn substrate_payload(number: u64, extrinsics: Vec<String>) -> BlockPayload {
	BlockPayload::Substrate(Box::new(substrate_block(number, extrinsics)))
}
