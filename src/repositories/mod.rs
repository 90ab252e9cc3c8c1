//! Storage ports and their adapters.
//!
//! The ports are the only way the pipeline touches persistent state:
//! - [`SyncCursorStore`]: last processed block per `(protocol, network)`
//! - [`PublicKeyStore`]: recovered sender public keys
//! - [`TransactionStore`]: normalized transactions carrying a payload
//! - [`RawTransactionStore`]: provider-native transaction objects
//!
//! Every write is a keyed upsert, so reprocessing a block after a crash is safe.

mod cursor;
mod encoding;
mod error;
mod file;
mod memory;
mod public_key;
mod transaction;

pub use cursor::SyncCursorStore;
pub use encoding::{u256_from_bytes, u256_to_bytes, PublicKeyRow, TransactionRow};
pub use error::RepositoryError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use public_key::PublicKeyStore;
pub use transaction::{RawTransactionStore, TransactionStore};
