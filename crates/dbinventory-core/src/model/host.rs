//! Host model

use serde::{Deserialize, Serialize};

/// A host row as stored in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: i64,

    /// Connection target (hostname or IP); unique across the ledger
    pub host: String,

    pub host_name: Option<String>,
    pub ssh_user: Option<String>,
    pub ssh_port: Option<u16>,
}

impl Host {
    /// Human-facing name, falling back to the address
    pub fn display_name(&self) -> &str {
        self.host_name.as_deref().unwrap_or(&self.host)
    }
}

/// Fields accepted when adding a host
///
/// This is also the shape of a `hosts` entry in the import/export document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHost {
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_port: Option<u16>,

    /// Tag names to attach; names that do not resolve are skipped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewHost {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = Some(host_name.into());
        self
    }

    pub fn with_ssh_user(mut self, ssh_user: impl Into<String>) -> Self {
        self.ssh_user = Some(ssh_user.into());
        self
    }

    pub fn with_ssh_port(mut self, ssh_port: u16) -> Self {
        self.ssh_port = Some(ssh_port);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A tag attached to a host, with the name of its group resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedAs {
    pub tag: String,
    pub group: String,
}

/// A ledger host together with its tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHost {
    pub host: Host,
    pub tags: Vec<TaggedAs>,
}

impl LedgerHost {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.tag == name)
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.tag.clone()).collect()
    }
}
