//! Storage code tables.
//!
//! Protocols, networks and key kinds are persisted as compact integer codes. The tables are
//! closed: they are built once, never written to, and a lookup of an entry that is not listed
//! is an error rather than a new code.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::KeyKind;

/// Errors returned by code table lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
	/// The protocol name is not in the protocol table
	#[error("Unknown protocol: {0}")]
	UnknownProtocol(String),

	/// The network is not registered for the protocol
	#[error("Unknown network {network} for protocol {protocol}")]
	UnknownNetwork { protocol: String, network: String },

	/// The key kind is not in the key kind table
	#[error("Unknown key kind: {0}")]
	UnknownKeyKind(String),

	/// No address prefix is registered for the network
	#[error("No SS58 prefix for network: {0}")]
	UnknownAddressFormat(String),
}

lazy_static! {
	static ref PROTOCOL_CODES: HashMap<&'static str, u8> =
		HashMap::from([("ethereum", 1), ("substrate", 2)]);
	static ref NETWORK_CODES: HashMap<(&'static str, &'static str), u8> = HashMap::from([
		(("ethereum", "mainnet"), 1),
		(("ethereum", "goerli"), 2),
		(("ethereum", "kovan"), 3),
		(("ethereum", "rinkeby"), 4),
		(("ethereum", "ropsten"), 5),
		(("substrate", "edgeware-mainnet"), 1),
		(("substrate", "edgeware-beresheet"), 2),
		(("substrate", "edgeware-local"), 3),
	]);
	static ref KEY_KIND_CODES: HashMap<&'static str, u8> =
		HashMap::from([("secp256k1", 1), ("ed25519", 2), ("sr25519", 3)]);
	static ref SS58_PREFIXES: HashMap<&'static str, u16> = HashMap::from([
		("edgeware-mainnet", 7),
		("edgeware-beresheet", 7),
		("edgeware-local", 42),
	]);
}

/// Code of a protocol name
pub fn protocol_code(protocol: &str) -> Result<u8, CodeError> {
	PROTOCOL_CODES
		.get(protocol)
		.copied()
		.ok_or_else(|| CodeError::UnknownProtocol(protocol.to_string()))
}

/// Code of a network within a protocol
pub fn network_code(protocol: &str, network: &str) -> Result<u8, CodeError> {
	protocol_code(protocol)?;
	NETWORK_CODES
		.get(&(protocol, network))
		.copied()
		.ok_or_else(|| CodeError::UnknownNetwork {
			protocol: protocol.to_string(),
			network: network.to_string(),
		})
}

/// Code of a key kind
pub fn key_kind_code(kind: KeyKind) -> Result<u8, CodeError> {
	KEY_KIND_CODES
		.get(kind.as_str())
		.copied()
		.ok_or_else(|| CodeError::UnknownKeyKind(kind.as_str().to_string()))
}

/// SS58 address prefix of a Substrate network
pub fn ss58_prefix(network: &str) -> Result<u16, CodeError> {
	SS58_PREFIXES
		.get(network)
		.copied()
		.ok_or_else(|| CodeError::UnknownAddressFormat(network.to_string()))
}
