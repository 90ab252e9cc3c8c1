//! Driver loop of the block watcher.
//!
//! The service keeps stepping its processor until shutdown is requested or a step keeps failing
//! after the whole retry budget has been spent. Each step gets a fresh budget. The shutdown
//! signal is only observed between steps, so a block is never left half processed by it.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::instrument;

use crate::{
	services::blockwatcher::{BlockProcessor, BlockWatcherError},
	utils::retry::{RetryConfig, WithRetry},
};

/// Drives a [`BlockProcessor`] with retries
pub struct BlockWatcherService<P: ?Sized> {
	processor: Arc<P>,
	retry: WithRetry,
}

impl<P: BlockProcessor + ?Sized> BlockWatcherService<P> {
	pub fn new(processor: Arc<P>, retry_config: RetryConfig) -> Self {
		Self {
			processor,
			retry: WithRetry::new(retry_config),
		}
	}

	/// Runs steps until shutdown or until a step exhausts its retry budget
	///
	/// Returns the last cursor value reached when stopped by `shutdown`, or the error of the
	/// failing step.
	#[instrument(skip_all)]
	pub async fn run(
		&self,
		shutdown: watch::Receiver<bool>,
	) -> Result<Option<u64>, BlockWatcherError> {
		let mut last = None;
		loop {
			if *shutdown.borrow() {
				tracing::info!(cursor = ?last, "Shutdown requested, block watcher stopped");
				return Ok(last);
			}

			let cursor = self.retry.attempt(|| self.processor.step()).await?;
			last = Some(cursor);
		}
	}
}
