//! DigitalOcean provider for dbinventory
//!
//! This crate implements the InventoryProvider trait for DigitalOcean,
//! supplying droplets, regions, images, sizes, SSH keys and domains.
//!
//! # Requirements
//!
//! - A DigitalOcean client id and API key (`DO_CLIENT_ID`, `DO_API_KEY`)
//!
//! # Example
//!
//! ```ignore
//! use dbinventory_cloud::{CacheManager, CachePolicy, Query, SnapshotStore};
//! use dbinventory_cloud_digitalocean::DigitalOceanProvider;
//! use std::sync::Arc;
//!
//! let provider = Arc::new(DigitalOceanProvider::new(client_id, api_key));
//! let cache = CacheManager::new(
//!     provider,
//!     SnapshotStore::new("./ansible-digital_ocean.cache"),
//!     CachePolicy::default(),
//! );
//! let ctx = cache.load(Query::List).await?;
//! ```

pub mod api;
pub mod error;
pub mod provider;

pub use api::DigitalOceanApi;
pub use error::{DigitalOceanError, Result};
pub use provider::DigitalOceanProvider;
