//! Configuration errors.
//!
//! Raised while the indexer configuration is assembled from CLI flags and the environment,
//! before any component is built.

use log::error;
use std::{error::Error, fmt};

use crate::models::CodeError;

#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// A value is well-formed but not acceptable, e.g. an unregistered network
	ValidationError(String),
	/// A value could not be parsed at all
	ParseError(String),
}

impl ConfigError {
	fn format_message(&self) -> String {
		match self {
			Self::ValidationError(msg) => format!("Invalid configuration: {}", msg),
			Self::ParseError(msg) => format!("Unparsable configuration: {}", msg),
		}
	}

	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = Self::ParseError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ConfigError {}

impl From<url::ParseError> for ConfigError {
	fn from(err: url::ParseError) -> Self {
		Self::parse_error(format!("invalid RPC address: {}", err))
	}
}

impl From<CodeError> for ConfigError {
	fn from(err: CodeError) -> Self {
		Self::validation_error(err.to_string())
	}
}
