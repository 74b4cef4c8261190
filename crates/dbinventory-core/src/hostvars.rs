//! Per-host variables for `--host` queries

use crate::index::Indices;
use crate::model::{LedgerHost, Record};
use serde_json::{Value, json};

/// Variable name → value, as printed for a single host
pub type HostVars = serde_json::Map<String, Value>;

const DROPLET_PREFIX: &str = "do_";

/// Project a droplet into the `do_` namespace
///
/// Human-readable `do_region`, `do_size`, `do_image` and `do_distro` are
/// added only when the matching id field is present; an id the indices cannot
/// resolve yields `null`.
pub fn droplet_variables(droplet: &Record, indices: &Indices) -> HostVars {
    let mut vars: HostVars = droplet
        .iter()
        .map(|(k, v)| (format!("{DROPLET_PREFIX}{k}"), Value::String(v.clone())))
        .collect();

    let resolve = |index: &crate::index::Index, id: &String| {
        index
            .get(id)
            .map(|name| Value::String(name.clone()))
            .unwrap_or(Value::Null)
    };

    if let Some(id) = droplet.get("region_id") {
        vars.insert("do_region".into(), resolve(&indices.region_to_name, id));
    }
    if let Some(id) = droplet.get("size_id") {
        vars.insert("do_size".into(), resolve(&indices.size_to_name, id));
    }
    if let Some(id) = droplet.get("image_id") {
        vars.insert("do_image".into(), resolve(&indices.image_to_name, id));
        vars.insert("do_distro".into(), resolve(&indices.image_to_distro, id));
    }

    vars
}

/// Connection variables for a ledger host
pub fn ledger_variables(ledger_host: &LedgerHost, ssh_pass: Option<&str>) -> HostVars {
    let host = &ledger_host.host;
    let mut vars = HostVars::new();

    vars.insert("ansible_host".into(), json!(host.host));
    if let Some(name) = &host.host_name {
        vars.insert("dbinventory_host_name".into(), json!(name));
    }
    if let Some(user) = &host.ssh_user {
        vars.insert("ansible_user".into(), json!(user));
    }
    if let Some(port) = host.ssh_port {
        vars.insert("ansible_port".into(), json!(port));
    }
    if let Some(pass) = ssh_pass {
        vars.insert("ansible_ssh_pass".into(), json!(pass));
    }
    vars.insert("dbinventory_tags".into(), json!(ledger_host.tag_names()));

    vars
}
