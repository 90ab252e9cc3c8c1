//! Block watcher error types.
//!
//! Every failure of a processor step maps to one of these errors. The cursor is never advanced
//! when a step fails; whether to retry or stop is up to the driver loop.

use log::error;
use std::error::Error;
use std::fmt;

use crate::services::decoder::DecodeError;

#[derive(Debug)]
pub enum BlockWatcherError {
	/// The sync cursor is missing or could not be read
	CursorUnavailable(String),
	/// The next block could not be fetched
	FetchFailed(String),
	/// The block could not be decoded
	DecodeFailed(DecodeError),
	/// The advanced cursor could not be written
	StoreFailed(String),
}

impl BlockWatcherError {
	fn format_message(&self) -> String {
		match self {
			Self::CursorUnavailable(msg) => format!("Cursor unavailable: {}", msg),
			Self::FetchFailed(msg) => format!("Fetch failed: {}", msg),
			Self::DecodeFailed(err) => format!("Decode failed: {}", err),
			Self::StoreFailed(msg) => format!("Store failed: {}", msg),
		}
	}

	pub fn cursor_unavailable(msg: impl Into<String>) -> Self {
		let error = Self::CursorUnavailable(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn fetch_failed(msg: impl Into<String>) -> Self {
		let error = Self::FetchFailed(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn decode_failed(err: DecodeError) -> Self {
		let error = Self::DecodeFailed(err);
		error!("{}", error.format_message());
		error
	}

	pub fn store_failed(msg: impl Into<String>) -> Self {
		let error = Self::StoreFailed(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for BlockWatcherError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for BlockWatcherError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::DecodeFailed(err) => Some(err),
			_ => None,
		}
	}
}

impl From<DecodeError> for BlockWatcherError {
	fn from(err: DecodeError) -> Self {
		Self::decode_failed(err)
	}
}
