use super::ledger;
use crate::Cli;
use colored::Colorize;
use dbinventory_config::Settings;
use dbinventory_core::NewHost;
use dbinventory_store::{LedgerStore, StoreError};

pub fn handle(cli: &Cli, settings: &Settings, store: &LedgerStore) -> anyhow::Result<()> {
    let Some(address) = cli.address.as_deref() else {
        anyhow::bail!("--add requires --address");
    };

    let mut new_host = NewHost::new(address);
    if let Some(name) = &cli.name {
        new_host = new_host.with_host_name(name);
    }
    if let Some(user) = &cli.ssh_user {
        new_host = new_host.with_ssh_user(user);
    }
    if let Some(port) = cli.ssh_port {
        new_host = new_host.with_ssh_port(port);
    }
    for tag in &cli.tags {
        new_host = new_host.with_tag(tag);
    }

    // Resolve the cipher before writing so a missing secret leaves no host behind
    let cipher = match &cli.ssh_pass {
        Some(_) => Some(ledger::cipher(settings)?.ok_or(StoreError::SecretRequired)?),
        None => None,
    };

    let host = store.add_host(&new_host)?;
    if let (Some(cipher), Some(pass)) = (&cipher, &cli.ssh_pass) {
        store.set_host_secret(host.id, cipher, pass)?;
    }

    let tags = store.list_tags_for_host(host.id)?;
    println!(
        "{} {} ({})",
        "✓".green(),
        host.display_name().cyan(),
        host.host
    );
    if !tags.is_empty() {
        let names: Vec<String> = tags
            .iter()
            .map(|t| format!("{}:{}", t.group, t.tag))
            .collect();
        println!("  tags: {}", names.join(", "));
    }

    Ok(())
}
