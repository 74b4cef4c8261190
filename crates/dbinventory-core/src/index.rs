//! Lookup indices over provider collections

use crate::model::{Collection, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source value → target value
pub type Index = BTreeMap<String, String>;

/// Build an index from `key_from` to `key_to`
///
/// With `use_slug` set, a record carrying a `slug` maps to the slug instead of
/// `key_to`. Later records overwrite earlier ones. Records missing either key
/// are skipped.
pub fn build_index(records: &[Record], key_from: &str, key_to: &str, use_slug: bool) -> Index {
    let mut index = Index::new();
    for record in records {
        let target = match record.get("slug") {
            Some(slug) if use_slug => Some(slug),
            _ => record.get(key_to),
        };

        match (record.get(key_from), target) {
            (Some(key), Some(value)) => {
                index.insert(key.clone(), value.clone());
            }
            _ => {
                tracing::debug!(key_from, key_to, "skipping record without index keys");
            }
        }
    }
    index
}

/// The named indices used during synthesis
///
/// Serialized as the `index` section of the snapshot. Fields are declared in
/// name order so the section serializes with sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indices {
    /// Droplet address → droplet id
    #[serde(default)]
    pub host_to_droplet: Index,

    #[serde(default)]
    pub image_to_distro: Index,

    #[serde(default)]
    pub image_to_name: Index,

    #[serde(default)]
    pub region_to_name: Index,

    #[serde(default)]
    pub size_to_name: Index,
}

impl Indices {
    /// Build every index from sanitized collection data
    pub fn build(data: &BTreeMap<Collection, Vec<Record>>) -> Self {
        let records = |c: Collection| data.get(&c).map(Vec::as_slice).unwrap_or(&[]);

        let regions = records(Collection::Regions);
        let sizes = records(Collection::Sizes);
        let images = records(Collection::Images);

        Self {
            region_to_name: build_index(regions, "id", "name", true),
            size_to_name: build_index(sizes, "id", "name", true),
            image_to_name: build_index(images, "id", "name", true),
            image_to_distro: build_index(images, "id", "distribution", false),
            host_to_droplet: Self::droplet_index(records(Collection::Droplets)),
        }
    }

    /// Address → id index over droplets
    pub fn droplet_index(droplets: &[Record]) -> Index {
        build_index(droplets, "ip_address", "id", false)
    }
}
