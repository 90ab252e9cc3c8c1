use std::{
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
	time::Duration,
};
use tokio::sync::watch;

use crate::integration::mocks::MockProcessor;
use chain_key_indexer::{
	services::blockwatcher::{BlockWatcherError, BlockWatcherService},
	utils::retry::RetryConfig,
};

fn fast_retry(max_retries: u32) -> RetryConfig {
	RetryConfig {
		max_retries,
		initial_delay: Duration::from_millis(1),
		max_delay: Duration::from_millis(2),
	}
}

#[tokio::test]
async fn test_shutdown_before_first_step() {
	let mut processor = MockProcessor::new();
	processor.expect_step().times(0);
	let (_tx, rx) = watch::channel(true);

	let service = BlockWatcherService::new(Arc::new(processor), fast_retry(3));
	assert_eq!(service.run(rx).await.unwrap(), None);
}

#[tokio::test]
async fn test_shutdown_is_observed_between_steps() {
	let (tx, rx) = watch::channel(false);
	let cursor = Arc::new(AtomicU64::new(0));
	let mut processor = MockProcessor::new();
	processor.expect_step().times(3).returning(move || {
		let next = cursor.fetch_add(1, Ordering::SeqCst) + 1;
		if next == 3 {
			tx.send(true).unwrap();
		}
		Ok(next)
	});

	let service = BlockWatcherService::new(Arc::new(processor), fast_retry(3));
	assert_eq!(service.run(rx).await.unwrap(), Some(3));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
	let (tx, rx) = watch::channel(false);
	let calls = Arc::new(AtomicU64::new(0));
	let mut processor = MockProcessor::new();
	processor.expect_step().times(2).returning(move || {
		if calls.fetch_add(1, Ordering::SeqCst) == 0 {
			Err(BlockWatcherError::fetch_failed("block not produced yet"))
		} else {
			tx.send(true).unwrap();
			Ok(5)
		}
	});

	let service = BlockWatcherService::new(Arc::new(processor), fast_retry(3));
	assert_eq!(service.run(rx).await.unwrap(), Some(5));
}

#[tokio::test]
async fn test_exhausted_budget_stops_the_service() {
	let (_tx, rx) = watch::channel(false);
	let mut processor = MockProcessor::new();
	processor
		.expect_step()
		.times(4)
		.returning(|| Err(BlockWatcherError::cursor_unavailable("no cursor")));

	let service = BlockWatcherService::new(Arc::new(processor), fast_retry(4));
	let result = service.run(rx).await;
	assert!(matches!(result, Err(BlockWatcherError::CursorUnavailable(_))));
}
