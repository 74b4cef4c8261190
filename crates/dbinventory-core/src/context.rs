//! Synthesis context
//!
//! One value holding everything a run knows about the provider side: the
//! sanitized collections, the indices derived from them, and the inventory
//! synthesized from both. It is passed by reference from the cache layer down
//! to synthesis, and its serialized form is the cache snapshot.

use crate::hostvars::{HostVars, droplet_variables};
use crate::index::Indices;
use crate::inventory::{Inventory, build_droplet_inventory};
use crate::model::{Collection, Record};
use crate::sanitize::to_safe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisContext {
    /// Sanitized records per collection
    #[serde(default)]
    pub data: BTreeMap<Collection, Vec<Record>>,

    #[serde(default)]
    pub index: Indices,

    #[serde(default)]
    pub inventory: Inventory,

    /// Whether `data` was fetched live during this run
    #[serde(skip)]
    pub refreshed: bool,
}

impl SynthesisContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from freshly fetched, sanitized collections
    pub fn from_collections(data: BTreeMap<Collection, Vec<Record>>) -> Self {
        let mut ctx = Self {
            index: Indices::build(&data),
            data,
            inventory: Inventory::new(),
            refreshed: true,
        };
        ctx.rebuild_inventory();
        ctx
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn collection(&self, collection: Collection) -> &[Record] {
        self.data.get(&collection).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn droplets(&self) -> &[Record] {
        self.collection(Collection::Droplets)
    }

    /// Swap in a new droplet list and re-derive what depends on it
    pub fn replace_droplets(&mut self, droplets: Vec<Record>) {
        self.index.host_to_droplet = Indices::droplet_index(&droplets);
        self.data.insert(Collection::Droplets, droplets);
        self.rebuild_inventory();
    }

    pub fn rebuild_inventory(&mut self) {
        self.inventory = build_droplet_inventory(self.droplets(), &self.index);
    }

    /// Droplet id for a user-supplied host token
    ///
    /// The token is sanitized first so lookups tolerate punctuation.
    pub fn droplet_id_for(&self, host: &str) -> Option<&str> {
        self.index
            .host_to_droplet
            .get(&to_safe(host))
            .map(String::as_str)
    }

    /// Cached droplet record by address
    pub fn droplet_by_address(&self, host: &str) -> Option<&Record> {
        let host = to_safe(host);
        self.droplets()
            .iter()
            .find(|d| d.get("ip_address") == Some(&host))
    }

    /// `do_` variables for a droplet record, resolved against this context
    pub fn droplet_variables(&self, droplet: &Record) -> HostVars {
        droplet_variables(droplet, &self.index)
    }

    /// Collections as a JSON object keyed by collection name
    pub fn collections_json(&self, only: Option<Collection>) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .data
            .iter()
            .filter(|(c, _)| only.is_none_or(|o| o == **c))
            .map(|(c, records)| {
                (
                    c.as_str().to_string(),
                    serde_json::to_value(records).unwrap_or_default(),
                )
            })
            .collect();
        serde_json::Value::Object(map)
    }
}
