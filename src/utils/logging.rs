//! Logging setup.
//!
//! Events are written through `tracing_subscriber` in a compact single-line format. The filter
//! comes from `RUST_LOG` and falls back to [`DEFAULT_FILTER`]. Records emitted through the `log`
//! macros (used by the error constructors) are forwarded to the same subscriber.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is not set
///
/// The HTTP stack is kept at `warn` so a block step logs one line instead of one per request.
pub const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn,reqwest_retry=warn";

type SetupResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Installs the global subscriber writing to stderr
pub fn setup_logging() -> SetupResult {
	setup_logging_with_writer(std::io::stderr)
}

/// Installs the global subscriber writing to `writer`
pub fn setup_logging_with_writer<W>(writer: W) -> SetupResult
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(env_filter())
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(false)
						.compact(),
				),
		)
		.try_init()?;
	Ok(())
}

fn env_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
