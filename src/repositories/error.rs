//! Error types for repository operations.
//!
//! This module defines the error types that can occur while reading from and writing to the
//! indexer stores. Every store adapter reports failures through [`RepositoryError`], so the
//! callers handle the in-memory and file-backed stores the same way.

use log::error;
use std::error::Error;
use std::fmt;

use crate::models::CodeError;

/// Errors that can occur during repository operations
#[derive(Debug)]
pub enum RepositoryError {
	/// A protocol, network or key kind is not in the code tables
	ValidationError(String),

	/// Stored data could not be read or decoded
	LoadError(String),

	/// Stored data could not be written
	InternalError(String),
}

impl RepositoryError {
	/// Format an error message for display
	///
	/// Creates a human-readable error message based on the error type.
	fn format_message(&self) -> String {
		match self {
			Self::ValidationError(msg) => format!("Validation error: {}", msg),
			Self::LoadError(msg) => format!("Load error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Create a new validation error with the given message
	///
	/// Also logs the error message at the error level.
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Create a new load error with the given message
	///
	/// Also logs the error message at the error level.
	pub fn load_error(msg: impl Into<String>) -> Self {
		let error = Self::LoadError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Create a new internal error with the given message
	///
	/// Also logs the error message at the error level.
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for RepositoryError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for RepositoryError {}

impl From<std::io::Error> for RepositoryError {
	fn from(err: std::io::Error) -> Self {
		Self::internal_error(err.to_string())
	}
}

impl From<serde_json::Error> for RepositoryError {
	fn from(err: serde_json::Error) -> Self {
		Self::load_error(err.to_string())
	}
}

impl From<CodeError> for RepositoryError {
	fn from(err: CodeError) -> Self {
		Self::validation_error(err.to_string())
	}
}
