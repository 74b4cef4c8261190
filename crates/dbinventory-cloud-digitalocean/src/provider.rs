//! DigitalOcean provider implementation

use crate::api::DigitalOceanApi;
use async_trait::async_trait;
use dbinventory_cloud::InventoryProvider;
use dbinventory_core::{Collection, RawRecord};

/// DigitalOcean provider
pub struct DigitalOceanProvider {
    api: DigitalOceanApi,
}

impl DigitalOceanProvider {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api: DigitalOceanApi::new(client_id, api_key),
        }
    }

    pub fn with_api(api: DigitalOceanApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl InventoryProvider for DigitalOceanProvider {
    fn name(&self) -> &str {
        "digitalocean"
    }

    async fn fetch(&self, collection: Collection) -> dbinventory_cloud::Result<Vec<RawRecord>> {
        Ok(self.api.list(collection).await?)
    }

    async fn show_droplet(&self, id: &str) -> dbinventory_cloud::Result<Option<RawRecord>> {
        Ok(self.api.show_droplet(id).await?)
    }
}
