//! Blockchain client interfaces and implementations.
//!
//! Provides abstractions and concrete implementations for reading blocks from the supported
//! chain families. Includes:
//!
//! - Generic block source trait
//! - Chain specific clients
//! - JSON-RPC transport
//! - Error handling for blockchain operations

mod client;
mod clients;
mod error;
mod transports;

pub use client::BlockChainClient;
pub use clients::{EthereumClient, SubstrateClient};
pub use error::BlockChainError;
pub use transports::{extract_result, BlockchainTransport, HttpTransportClient};
