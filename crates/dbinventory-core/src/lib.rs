//! dbinventory core
//!
//! Pure inventory synthesis for dbinventory. Nothing in this crate touches the
//! network, the filesystem, or the ledger database; callers hand in records and
//! get back grouped inventories.
//!
//! # Pipeline
//!
//! ```text
//!  provider records ──► sanitize ──► Indices::build ──► build_droplet_inventory ─┐
//!                                                                               ├─► Inventory
//!  ledger hosts + tags ─────────────────────────────► build_ledger_inventory ───┘
//! ```
//!
//! The [`SynthesisContext`] carries the sanitized data, the indices, and the
//! inventory between those steps and is what the cache layer persists.

pub mod context;
pub mod error;
pub mod hostvars;
pub mod index;
pub mod inventory;
pub mod model;
pub mod sanitize;

// Re-exports
pub use context::SynthesisContext;
pub use error::{InventoryError, Result};
pub use hostvars::{HostVars, droplet_variables, ledger_variables};
pub use index::{Index, Indices, build_index};
pub use inventory::{Inventory, build_droplet_inventory, build_ledger_inventory};
pub use model::*;
pub use sanitize::{is_safe, sanitize_record, sanitize_records, sanitize_value, to_safe};
