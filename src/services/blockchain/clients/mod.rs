//! Blockchain client implementations.
//!
//! Contains specific implementations for the supported chain families:
//! - Ethereum client for account based chains
//! - Substrate client for SCALE extrinsic chains

mod ethereum;
mod substrate;

pub use ethereum::EthereumClient;
pub use substrate::SubstrateClient;
