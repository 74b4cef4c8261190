//! Provider gateway trait

use crate::error::Result;
use async_trait::async_trait;
use dbinventory_core::{Collection, RawRecord, Record, sanitize_records};
use std::collections::BTreeMap;

/// Source of raw infrastructure metadata
///
/// Implementations fetch whole collections; they do no caching, retrying,
/// or sanitizing of their own.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Returns the provider name (e.g., "digitalocean")
    fn name(&self) -> &str;

    /// Fetch every record of a collection
    async fn fetch(&self, collection: Collection) -> Result<Vec<RawRecord>>;

    /// Fetch a single droplet by id, `None` if the provider does not know it
    async fn show_droplet(&self, id: &str) -> Result<Option<RawRecord>>;
}

/// Fetch and sanitize one collection
pub async fn fetch_sanitized(
    provider: &dyn InventoryProvider,
    collection: Collection,
) -> Result<Vec<Record>> {
    let raw = provider.fetch(collection).await?;
    tracing::debug!(
        provider = provider.name(),
        %collection,
        count = raw.len(),
        "Fetched collection"
    );
    Ok(sanitize_records(&raw))
}

/// Fetch and sanitize every collection
pub async fn fetch_all(
    provider: &dyn InventoryProvider,
) -> Result<BTreeMap<Collection, Vec<Record>>> {
    let mut data = BTreeMap::new();
    for collection in Collection::ALL {
        data.insert(collection, fetch_sanitized(provider, collection).await?);
    }
    Ok(data)
}
