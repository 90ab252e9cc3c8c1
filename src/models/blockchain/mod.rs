//! Protocol-specific chain payloads.
//!
//! Blocks travel through the pipeline as a closed [`BlockPayload`] union, so a decoder can
//! only ever be handed a payload of a known protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod ethereum;
pub mod substrate;

/// Supported chain families
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
	/// Account based chains signing with secp256k1 ECDSA
	Ethereum,
	/// SCALE encoded extrinsic chains
	Substrate,
}

impl Protocol {
	/// Name of the protocol as used by the CLI and the storage code tables
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Ethereum => "ethereum",
			Self::Substrate => "substrate",
		}
	}
}

impl fmt::Display for Protocol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for Protocol {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ethereum" => Ok(Self::Ethereum),
			"substrate" => Ok(Self::Substrate),
			other => Err(format!("unknown protocol: {}", other)),
		}
	}
}

/// Block data fetched from one of the supported chain families
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BlockPayload {
	/// Ethereum block with full transaction objects
	Ethereum(Box<ethereum::EthereumBlock>),
	/// Substrate block with its hash and encoded extrinsics
	Substrate(Box<substrate::SubstrateBlock>),
}

impl BlockPayload {
	/// Protocol the payload belongs to
	pub fn protocol(&self) -> Protocol {
		match self {
			Self::Ethereum(_) => Protocol::Ethereum,
			Self::Substrate(_) => Protocol::Substrate,
		}
	}

	/// Block number, when the node reported one
	pub fn number(&self) -> Option<u64> {
		match self {
			Self::Ethereum(block) => block.number(),
			Self::Substrate(block) => block.number(),
		}
	}
}

/// Block context handed to a transaction decoder
#[derive(Debug, Clone, Copy)]
pub enum TxContext<'a> {
	Ethereum(ethereum::EthereumTxContext<'a>),
	Substrate(substrate::SubstrateTxContext<'a>),
}

impl TxContext<'_> {
	/// Protocol of the block the context was built from
	pub fn protocol(&self) -> Protocol {
		match self {
			Self::Ethereum(_) => Protocol::Ethereum,
			Self::Substrate(_) => Protocol::Substrate,
		}
	}
}
