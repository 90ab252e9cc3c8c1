//! Chain key indexer.
//!
//! Walks Ethereum-family and Substrate-family chains block by block, recovers the full
//! public key of every transaction sender and persists the transactions that carry a
//! mailchain payload.
//!
//! # Modules
//! - `bootstrap`: wiring of clients, decoders, stores and the driver loop
//! - `models`: chain payloads, normalized records, code tables and configuration
//! - `repositories`: storage ports and their in-memory and file-backed adapters
//! - `services`: block sources, decoders and the block watcher
//! - `utils`: logging and retry helpers

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
