//! Core domain models shared by every protocol.
//!
//! - Normalized transactions and sync cursors
//! - Public key records and key kinds
//! - Code tables mapping names to the compact codes used at the storage boundary

mod codes;
mod public_key;
mod transaction;

pub use codes::{key_kind_code, network_code, protocol_code, ss58_prefix, CodeError};
pub use public_key::{KeyKind, PublicKeyRecord};
pub use transaction::{NormalizedTransaction, SyncCursor};
