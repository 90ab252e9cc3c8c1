use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{network_code, ss58_prefix, Protocol};

use super::error::ConfigError;

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "INDEXER_DATA_DIR";

/// Environment variable overriding the RPC address
pub const ENV_RPC_ADDRESS: &str = "INDEXER_RPC_ADDRESS";

/// Retry budget of the driver loop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrySettings {
	/// Attempts per step before the indexer gives up
	pub max_retries: u32,
	/// Delay before the first retry, in milliseconds
	pub initial_delay_ms: u64,
	/// Upper bound of the backoff delay, in milliseconds
	pub max_delay_ms: u64,
}

impl Default for RetrySettings {
	fn default() -> Self {
		Self {
			max_retries: 5,
			initial_delay_ms: 1000,
			max_delay_ms: 30_000,
		}
	}
}

/// Settings of one indexer process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexerConfig {
	/// Chain family being indexed
	pub protocol: Protocol,
	/// Network name within the protocol, e.g. `mainnet` or `edgeware-mainnet`
	pub network: String,
	/// JSON-RPC endpoint of the block source
	pub rpc_address: String,
	/// Cursor value the indexer starts from; the first block fetched is the next one
	pub start_block: u64,
	/// Directory of the file store
	pub data_dir: PathBuf,
	/// Driver loop retry budget
	#[serde(default)]
	pub retry: RetrySettings,
}

impl IndexerConfig {
	/// Resolves the `--protocol` flag against the subcommand it was given to
	///
	/// The flag is optional; when present it has to name the subcommand's protocol.
	pub fn resolve_protocol(
		subcommand: Protocol,
		requested: Option<&str>,
	) -> Result<Protocol, ConfigError> {
		let Some(requested) = requested else {
			return Ok(subcommand);
		};
		let protocol = requested
			.parse::<Protocol>()
			.map_err(ConfigError::parse_error)?;
		if protocol != subcommand {
			return Err(ConfigError::validation_error(format!(
				"protocol {} does not match the {} subcommand",
				protocol, subcommand
			)));
		}
		Ok(protocol)
	}

	/// Applies overrides from the process environment
	pub fn apply_env_overrides(self) -> Self {
		self.apply_overrides(|key| std::env::var(key).ok())
	}

	/// Applies overrides looked up through `lookup`
	pub fn apply_overrides<F>(mut self, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
			self.data_dir = PathBuf::from(dir);
		}
		if let Some(address) = lookup(ENV_RPC_ADDRESS).filter(|v| !v.is_empty()) {
			self.rpc_address = address;
		}
		self
	}

	/// Checks the configuration before any component is built
	pub fn validate(&self) -> Result<(), ConfigError> {
		network_code(self.protocol.as_str(), &self.network)?;
		if self.protocol == Protocol::Substrate {
			ss58_prefix(&self.network)?;
		}

		let url = url::Url::parse(&self.rpc_address)?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::validation_error(
				"RPC address must start with http:// or https://",
			));
		}

		if self.retry.max_retries == 0 {
			return Err(ConfigError::validation_error(
				"max_retries must be greater than 0",
			));
		}
		if self.retry.initial_delay_ms > self.retry.max_delay_ms {
			return Err(ConfigError::validation_error(
				"initial_delay_ms must not exceed max_delay_ms",
			));
		}

		Ok(())
	}
}
