//! Retry mechanism for handling transient failures in async operations.
//!
//! Operations are retried with exponential backoff: the delay doubles after every failed
//! attempt and is capped at the configured maximum.

use std::time::Duration;

use crate::models::RetrySettings;

/// Configuration for retry behavior
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
	/// Total number of attempts before giving up
	pub max_retries: u32,

	/// Delay before the second attempt, doubled for every further one
	pub initial_delay: Duration,

	/// Upper bound of the backoff delay
	pub max_delay: Duration,
}

impl Default for RetryConfig {
	fn default() -> Self {
		RetrySettings::default().into()
	}
}

impl From<RetrySettings> for RetryConfig {
	fn from(settings: RetrySettings) -> Self {
		Self {
			max_retries: settings.max_retries,
			initial_delay: Duration::from_millis(settings.initial_delay_ms),
			max_delay: Duration::from_millis(settings.max_delay_ms),
		}
	}
}

impl RetryConfig {
	/// Backoff before the attempt following the `attempt`-th failure (1-based)
	pub fn delay_for(&self, attempt: u32) -> Duration {
		let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
		self.initial_delay
			.checked_mul(factor)
			.unwrap_or(self.max_delay)
			.min(self.max_delay)
	}
}

/// Handler for retrying operations with exponential backoff
pub struct WithRetry {
	config: RetryConfig,
}

impl WithRetry {
	pub fn new(config: RetryConfig) -> Self {
		Self { config }
	}

	/// Attempts an async operation with configured retry behavior
	///
	/// The operation runs at most `max_retries` times (at least once). The error of the last
	/// attempt is returned once the budget is exhausted.
	pub async fn attempt<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
	where
		F: Fn() -> Fut + Send + Sync,
		Fut: std::future::Future<Output = Result<T, E>> + Send,
		T: Send,
		E: std::fmt::Display + Send,
	{
		let mut attempt = 0;
		loop {
			match operation().await {
				Ok(value) => return Ok(value),
				Err(e) => {
					attempt += 1;
					if attempt >= self.config.max_retries {
						tracing::error!(attempts = attempt, error = %e, "Retry budget exhausted");
						return Err(e);
					}

					let delay = self.config.delay_for(attempt);
					tracing::warn!(
						attempt,
						max_retries = self.config.max_retries,
						delay_ms = delay.as_millis() as u64,
						error = %e,
						"Operation failed, retrying"
					);
					tokio::time::sleep(delay).await;
				}
			}
		}
	}
}
