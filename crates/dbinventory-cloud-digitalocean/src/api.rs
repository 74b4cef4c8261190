//! DigitalOcean API client
//!
//! Speaks the client-id/api-key flavour of the API, where every response is
//! wrapped as `{"status": "OK", "<collection>": [...]}` and droplets carry
//! `region_id`, `image_id`, `size_id` and `ip_address`.

use crate::error::{DigitalOceanError, Result};
use dbinventory_core::{Collection, RawRecord};
use serde_json::Value;

const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v1";

pub struct DigitalOceanApi {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    api_key: String,
}

impl DigitalOceanApi {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DIGITALOCEAN_API_BASE.to_string(),
            client_id: client_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at another API root (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all records of a collection
    pub async fn list(&self, collection: Collection) -> Result<Vec<RawRecord>> {
        let body = self.get(&collection_path(collection)).await?;
        parse_collection(body, collection.as_str())
    }

    /// Fetch one droplet, `None` on 404
    pub async fn show_droplet(&self, id: &str) -> Result<Option<RawRecord>> {
        let url = format!("{}/droplets/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .query(&[("client_id", &self.client_id), ("api_key", &self.api_key)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: Value = response.json().await?;
        parse_single(body, "droplet").map(Some)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("client_id", &self.client_id), ("api_key", &self.api_key)])
            .send()
            .await?;

        Ok(response.json().await?)
    }
}

fn collection_path(collection: Collection) -> String {
    format!("/{}/", collection.as_str())
}

fn check_status(body: &Value) -> Result<()> {
    match body.get("status").and_then(Value::as_str) {
        Some("OK") => Ok(()),
        _ => {
            let message = body
                .get("error_message")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            Err(DigitalOceanError::ApiError(message.to_string()))
        }
    }
}

/// Extract the `key` array from a wrapped response
pub(crate) fn parse_collection(body: Value, key: &str) -> Result<Vec<RawRecord>> {
    check_status(&body)?;

    let Some(Value::Array(items)) = body.get(key) else {
        return Err(DigitalOceanError::UnexpectedResponse(format!(
            "missing `{}` array",
            key
        )));
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record.clone()),
            other => Err(DigitalOceanError::UnexpectedResponse(format!(
                "`{}` entry is not an object: {}",
                key, other
            ))),
        })
        .collect()
}

/// Extract the `key` object from a wrapped response
pub(crate) fn parse_single(body: Value, key: &str) -> Result<RawRecord> {
    check_status(&body)?;

    match body.get(key) {
        Some(Value::Object(record)) => Ok(record.clone()),
        _ => Err(DigitalOceanError::UnexpectedResponse(format!(
            "missing `{}` object",
            key
        ))),
    }
}
