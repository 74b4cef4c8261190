//! DigitalOcean provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    #[error("DigitalOcean API error: {0}")]
    ApiError(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<DigitalOceanError> for dbinventory_cloud::CloudError {
    fn from(e: DigitalOceanError) -> Self {
        dbinventory_cloud::CloudError::ApiError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DigitalOceanError>;
