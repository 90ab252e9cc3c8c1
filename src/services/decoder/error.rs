//! Decoder error types.
//!
//! Any of these errors aborts the block being decoded; the block watcher reports them as
//! [`BlockWatcherError::DecodeFailed`](crate::services::blockwatcher::BlockWatcherError).

use thiserror::Error;

use crate::{models::Protocol, repositories::RepositoryError};

/// Errors raised while decoding a block or one of its transactions
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The decoder was handed a payload of another protocol
	#[error("Wrong payload type: expected {expected}, got {actual}")]
	WrongPayloadType { expected: Protocol, actual: Protocol },

	/// The sender public key could not be recovered from the signature
	#[error("Signature recovery failed: {0}")]
	SignatureRecoveryFailed(String),

	/// The transaction does not belong to the block it was decoded with
	#[error("Transaction {0} not in block")]
	TxNotInBlock(String),

	/// The extrinsic is signed with a scheme the decoder does not know
	#[error("Unsupported signature algorithm: {0}")]
	UnsupportedSignatureAlgorithm(String),

	/// A sender or recipient address could not be derived
	#[error("Address derivation failed: {0}")]
	AddressDerivationFailed(String),

	/// The transaction could not be decoded or re-encoded
	#[error("Codec failure: {0}")]
	CodecEncodeFailed(String),

	/// The payload segment is not valid hex
	#[error("Invalid payload encoding: {0}")]
	InvalidPayloadEncoding(String),

	/// A store rejected a write
	#[error("Store failed: {0}")]
	StoreFailed(#[from] RepositoryError),
}
