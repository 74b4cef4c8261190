use crate::Cli;
use crate::output;
use dbinventory_config::Settings;
use dbinventory_store::{LedgerDocument, LedgerStore, SecretCipher};

/// Open the ledger and apply `--db-import` if given
pub fn open(cli: &Cli, settings: &Settings) -> anyhow::Result<LedgerStore> {
    let store = LedgerStore::open(&settings.db_path, cli.db_create)?;

    if let Some(path) = &cli.db_import {
        let document = LedgerDocument::from_file(path)?;
        let summary = document.apply(&store)?;
        tracing::info!(
            groups = summary.groups,
            tags = summary.tags,
            hosts = summary.hosts,
            "Imported {}",
            path.display()
        );
    }

    Ok(store)
}

pub fn export(store: &LedgerStore, pretty: bool) -> anyhow::Result<()> {
    let document = LedgerDocument::export(store)?;
    output::print_json(&document, pretty)
}

/// Cipher for host passwords, when a database secret is configured
pub fn cipher(settings: &Settings) -> anyhow::Result<Option<SecretCipher>> {
    Ok(settings
        .db_secret
        .as_deref()
        .map(SecretCipher::new)
        .transpose()?)
}
