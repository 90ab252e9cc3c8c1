//! Block watcher: sequential block processing and the driver loop around it.
//!
//! - `SequentialProcessor`: one checkpointed step per block
//! - `BlockWatcherService`: retries steps and stops on shutdown or an exhausted budget

mod error;
mod processor;
mod service;

pub use error::BlockWatcherError;
pub use processor::{BlockProcessor, SequentialProcessor};
pub use service::BlockWatcherService;
