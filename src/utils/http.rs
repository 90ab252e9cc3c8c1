//! HTTP client construction for the JSON-RPC block sources.
//!
//! Requests go through `reqwest-middleware` with a `reqwest-retry` policy, so transient
//! transport failures are retried below the driver loop's own retry budget.

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{
	policies::ExponentialBackoff, Jitter, RetryTransientMiddleware, RetryableStrategy,
};
use std::time::Duration;

/// Configuration of the HTTP layer
#[derive(Debug, Clone)]
pub struct HttpRetryConfig {
	/// Maximum number of retries for transient errors
	pub max_retries: u32,
	/// Base of the exponential backoff
	pub base_for_backoff: u32,
	/// Backoff before the first retry
	pub initial_backoff: Duration,
	/// Upper bound of the backoff
	pub max_backoff: Duration,
	/// Jitter applied to the backoff
	pub jitter: Jitter,
	/// Timeout of a whole request
	pub request_timeout: Duration,
	/// Timeout of the connect phase
	pub connect_timeout: Duration,
}

impl Default for HttpRetryConfig {
	fn default() -> Self {
		Self {
			max_retries: 3,
			base_for_backoff: 2,
			initial_backoff: Duration::from_millis(250),
			max_backoff: Duration::from_secs(10),
			jitter: Jitter::Full,
			request_timeout: Duration::from_secs(30),
			connect_timeout: Duration::from_secs(20),
		}
	}
}

/// Builds the plain `reqwest` client the middleware wraps
pub fn build_base_client(config: &HttpRetryConfig) -> Result<reqwest::Client, reqwest::Error> {
	reqwest::ClientBuilder::new()
		.pool_idle_timeout(Duration::from_secs(90))
		.pool_max_idle_per_host(32)
		.timeout(config.request_timeout)
		.connect_timeout(config.connect_timeout)
		.build()
}

/// Creates a retryable HTTP client for a single endpoint
///
/// `custom_strategy` replaces the default decision of which responses are transient.
pub fn create_retryable_http_client<S>(
	config: &HttpRetryConfig,
	base_client: reqwest::Client,
	custom_strategy: Option<S>,
) -> ClientWithMiddleware
where
	S: RetryableStrategy + Send + Sync + 'static,
{
	let retry_policy = ExponentialBackoff::builder()
		.base(config.base_for_backoff)
		.retry_bounds(config.initial_backoff, config.max_backoff)
		.jitter(config.jitter)
		.build_with_max_retries(config.max_retries);

	if let Some(strategy) = custom_strategy {
		ClientBuilder::new(base_client).with(
			RetryTransientMiddleware::new_with_policy_and_strategy(retry_policy, strategy),
		)
	} else {
		ClientBuilder::new(base_client)
			.with(RetryTransientMiddleware::new_with_policy(retry_policy))
	}
	.build()
}
