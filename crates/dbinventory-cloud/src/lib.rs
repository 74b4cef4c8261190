//! dbinventory cloud
//!
//! Provider abstraction and the freshness-bounded snapshot cache that sits
//! between providers and inventory synthesis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 dbinventory CLI                  │
//! │        (--list / --host / --droplets ...)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               dbinventory-cloud                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  CacheManager (refresh vs reuse policy)   │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────┐  ┌──────────────────┐     │
//! │  │ InventoryProvider│  │  SnapshotStore   │     │
//! │  └──────────────────┘  └──────────────────┘     │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼──────────────┐
//! │ digitalocean provider│
//! └──────────────────────┘
//! ```

pub mod cache;
pub mod error;
pub mod provider;
pub mod snapshot;

// Re-exports
pub use cache::{CacheManager, CachePolicy, Query};
pub use error::{CloudError, Result};
pub use provider::{InventoryProvider, fetch_all, fetch_sanitized};
pub use snapshot::{SnapshotStore, is_fresh};
