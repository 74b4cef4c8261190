//! dbinventory ledger
//!
//! SQLite-backed store for hosts, tags, and tag groups.
//!
//! # Tables
//!
//! | table          | columns                                      |
//! |----------------|----------------------------------------------|
//! | `host`         | id, host, host_name, ssh_user, ssh_port      |
//! | `tag_group`    | id, name, selection_type                     |
//! | `tag`          | id, group_id, name                           |
//! | `host_tag_map` | host_id, tag_id                              |
//! | `host_secret`  | host_id, ssh_pass (AES-GCM, base64)          |
//!
//! Every add is idempotent by name (groups, tags) or address (hosts) and is
//! committed on its own.

pub mod cipher;
pub mod error;
mod schema;
pub mod store;
pub mod transfer;

// Re-exports
pub use cipher::SecretCipher;
pub use error::{Result, StoreError};
pub use store::LedgerStore;
pub use transfer::{ImportSummary, LedgerDocument};
