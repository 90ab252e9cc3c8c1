//! Indexer configuration.
//!
//! The configuration is assembled from command line arguments, overridden by environment
//! variables (optionally loaded from a `.env` file), and validated against the storage code
//! tables before any component is built.

mod error;
mod indexer_config;

pub use error::ConfigError;
pub use indexer_config::{IndexerConfig, RetrySettings, ENV_DATA_DIR, ENV_RPC_ADDRESS};
