//! Provider record shapes

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A record exactly as returned by a provider
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A record after sanitizing: every key and value is a group-safe token
pub type Record = BTreeMap<String, String>;

/// Metadata collections a provider can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Droplets,
    Regions,
    Images,
    Sizes,
    SshKeys,
    Domains,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Droplets,
        Collection::Regions,
        Collection::Images,
        Collection::Sizes,
        Collection::SshKeys,
        Collection::Domains,
    ];

    /// Key used in the snapshot `data` section and in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Droplets => "droplets",
            Collection::Regions => "regions",
            Collection::Images => "images",
            Collection::Sizes => "sizes",
            Collection::SshKeys => "ssh_keys",
            Collection::Domains => "domains",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InventoryError::UnknownCollection(s.to_string()))
    }
}
