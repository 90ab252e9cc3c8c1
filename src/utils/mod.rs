//! Utility modules for common functionality.
//!
//! - http: Retryable HTTP client construction
//! - logging: Tracing subscriber setup
//! - retry: Exponential backoff for the driver loop

pub mod http;
pub mod logging;
pub mod retry;

pub use http::{create_retryable_http_client, HttpRetryConfig};
pub use logging::{setup_logging, setup_logging_with_writer};
pub use retry::{RetryConfig, WithRetry};
