//! Core services of the indexer.
//!
//! - `blockchain`: JSON-RPC block sources
//! - `blockwatcher`: sequential processor and driver loop
//! - `decoder`: per-protocol block decoders and the payload filter

pub mod blockchain;
pub mod blockwatcher;
pub mod decoder;
