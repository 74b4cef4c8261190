//! Bulk import and export of the ledger
//!
//! The document has three optional sections applied in a fixed order:
//! `groups`, then `tags`, then `hosts`. Tags name their group and hosts name
//! their tags, so each section only references what the previous one created.

use crate::error::{Result, StoreError};
use crate::store::LedgerStore;
use dbinventory_core::{NewHost, NewTag, NewTagGroup};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub groups: Vec<NewTagGroup>,

    #[serde(default)]
    pub tags: Vec<NewTag>,

    #[serde(default)]
    pub hosts: Vec<NewHost>,
}

/// What an import touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub groups: usize,
    pub tags: usize,
    pub hosts: usize,
}

impl LedgerDocument {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::ImportFileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply the document to a ledger
    ///
    /// Stops at the first error; entities added before it stay committed.
    pub fn apply(&self, store: &LedgerStore) -> Result<ImportSummary> {
        for group in &self.groups {
            store.add_group(group)?;
        }
        for tag in &self.tags {
            store.add_tag(tag)?;
        }
        for host in &self.hosts {
            store.add_host(host)?;
        }

        let summary = ImportSummary {
            groups: self.groups.len(),
            tags: self.tags.len(),
            hosts: self.hosts.len(),
        };
        tracing::info!(
            groups = summary.groups,
            tags = summary.tags,
            hosts = summary.hosts,
            "Imported ledger document"
        );
        Ok(summary)
    }

    /// Dump the whole ledger in id order
    pub fn export(store: &LedgerStore) -> Result<Self> {
        let groups = store.list_groups()?;
        let group_names: HashMap<i64, String> =
            groups.iter().map(|g| (g.id, g.name.clone())).collect();

        let tags = store
            .list_tags()?
            .into_iter()
            .map(|tag| {
                let group = group_names.get(&tag.group_id).cloned().ok_or_else(|| {
                    StoreError::Corrupt(format!(
                        "tag {} references missing group {}",
                        tag.name, tag.group_id
                    ))
                })?;
                Ok(NewTag::new(tag.name, group))
            })
            .collect::<Result<Vec<_>>>()?;

        let hosts = store
            .ledger_hosts()?
            .into_iter()
            .map(|ledger_host| {
                let tags = ledger_host.tag_names();
                let host = ledger_host.host;
                NewHost {
                    host: host.host,
                    host_name: host.host_name,
                    ssh_user: host.ssh_user,
                    ssh_port: host.ssh_port,
                    tags,
                }
            })
            .collect();

        Ok(Self {
            groups: groups
                .into_iter()
                .map(|g| NewTagGroup::new(g.name, g.selection_type))
                .collect(),
            tags,
            hosts,
        })
    }
}
