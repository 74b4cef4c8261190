//! Inventory synthesis
//!
//! Folds droplet records and ledger hosts into Ansible groups. Group
//! membership only ever accumulates: pushing an address into a group that
//! already holds it is a no-op, and addresses keep their first-seen order.

use crate::index::Indices;
use crate::model::{LedgerHost, Record};
use crate::sanitize::to_safe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group key → addresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    groups: BTreeMap<String, Vec<String>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `address` to `group`, creating the group if needed
    pub fn push(&mut self, group: impl Into<String>, address: &str) {
        let members = self.groups.entry(group.into()).or_default();
        if !members.iter().any(|a| a == address) {
            members.push(address.to_string());
        }
    }

    /// Union `other` into this inventory
    pub fn merge(&mut self, other: Inventory) {
        for (group, addresses) in other.groups {
            for address in addresses {
                self.push(group.clone(), &address);
            }
        }
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn contains(&self, group: &str, address: &str) -> bool {
        self.get(group)
            .is_some_and(|members| members.iter().any(|a| a == address))
    }

    /// Groups an address belongs to, in key order
    pub fn groups_of(&self, address: &str) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(_, members)| members.iter().any(|a| a == address))
            .map(|(group, _)| group.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group droplets by id, name, region, image, size, status and distro
pub fn build_droplet_inventory(droplets: &[Record], indices: &Indices) -> Inventory {
    let mut inventory = Inventory::new();

    for droplet in droplets {
        let Some(dest) = droplet.get("ip_address") else {
            tracing::warn!(
                droplet = droplet.get("id").map(String::as_str).unwrap_or("?"),
                "droplet has no ip_address, leaving it out of the inventory"
            );
            continue;
        };

        if let Some(id) = droplet.get("id") {
            inventory.push(id.clone(), dest);
        }
        if let Some(name) = droplet.get("name") {
            inventory.push(name.clone(), dest);
        }

        let region_id = droplet.get("region_id");
        let image_id = droplet.get("image_id");
        let size_id = droplet.get("size_id");

        if let Some(id) = region_id {
            inventory.push(format!("region_{id}"), dest);
        }
        if let Some(id) = image_id {
            inventory.push(format!("image_{id}"), dest);
        }
        if let Some(id) = size_id {
            inventory.push(format!("size_{id}"), dest);
        }
        if let Some(status) = droplet.get("status") {
            inventory.push(format!("status_{status}"), dest);
        }

        if let Some(name) = region_id.and_then(|id| indices.region_to_name.get(id)) {
            inventory.push(format!("region_{name}"), dest);
        }
        if let Some(name) = size_id.and_then(|id| indices.size_to_name.get(id)) {
            inventory.push(format!("size_{name}"), dest);
        }
        if let Some(name) = image_id.and_then(|id| indices.image_to_name.get(id)) {
            inventory.push(format!("image_{name}"), dest);
        }
        if let Some(distro) = image_id.and_then(|id| indices.image_to_distro.get(id)) {
            inventory.push(format!("distro_{distro}"), dest);
        }
    }

    inventory
}

/// Group ledger hosts by address, display name, tag, and `<group>_<tag>`
///
/// The sanitized address is the identifier group, so an untagged host without
/// a display name is still listed.
pub fn build_ledger_inventory(hosts: &[LedgerHost]) -> Inventory {
    let mut inventory = Inventory::new();

    for ledger_host in hosts {
        let dest = ledger_host.host.host.as_str();

        inventory.push(to_safe(dest), dest);
        if let Some(name) = &ledger_host.host.host_name {
            inventory.push(to_safe(name), dest);
        }
        for tagged in &ledger_host.tags {
            inventory.push(to_safe(&tagged.tag), dest);
            inventory.push(to_safe(&format!("{}_{}", tagged.group, tagged.tag)), dest);
        }
    }

    inventory
}
