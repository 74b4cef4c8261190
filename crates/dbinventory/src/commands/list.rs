use super::provider;
use crate::Cli;
use crate::output;
use dbinventory_cloud::Query;
use dbinventory_config::Settings;
use dbinventory_core::build_ledger_inventory;
use dbinventory_store::LedgerStore;

/// `--list`: ledger groups, plus droplet groups when credentials are configured
pub async fn handle(cli: &Cli, settings: &Settings, store: &LedgerStore) -> anyhow::Result<()> {
    let mut inventory = build_ledger_inventory(&store.ledger_hosts()?);

    match &settings.credentials {
        Some(credentials) => {
            let cache = provider::cache_manager(cli, settings, credentials);
            let ctx = cache.load(Query::List).await?;
            inventory.merge(ctx.inventory);
        }
        None => tracing::debug!("No DigitalOcean credentials, listing the ledger only"),
    }

    output::print_json(&inventory, cli.pretty)
}
