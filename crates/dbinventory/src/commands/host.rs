use super::{ledger, provider};
use crate::Cli;
use crate::output;
use dbinventory_cloud::Query;
use dbinventory_config::Settings;
use dbinventory_core::{HostVars, ledger_variables};
use dbinventory_store::LedgerStore;

/// `--host`: variables for one host, `{}` when nothing knows it
///
/// Ledger variables come first; droplet `do_` variables are layered on top
/// when credentials are configured. Addresses the ledger knows are matched
/// against the snapshot only, without refreshing on a miss.
pub async fn handle(
    cli: &Cli,
    settings: &Settings,
    store: &LedgerStore,
    host: &str,
) -> anyhow::Result<()> {
    let mut vars = HostVars::new();
    let ledger_host = store.ledger_host(host)?;

    if let Some(ledger_host) = &ledger_host {
        let ssh_pass = match ledger::cipher(settings)? {
            Some(cipher) => store.host_secret(ledger_host.host.id, &cipher)?,
            None => {
                if store.has_host_secret(ledger_host.host.id)? {
                    tracing::warn!(
                        "{} has a stored password but no database secret was given",
                        host
                    );
                }
                None
            }
        };
        vars.extend(ledger_variables(ledger_host, ssh_pass.as_deref()));
    }

    if let Some(credentials) = &settings.credentials {
        let cache = provider::cache_manager(cli, settings, credentials);
        let mut ctx = cache.load(Query::Host).await?;
        // ledger hosts often have no droplet, so a miss does not refetch
        let droplet_vars = if ledger_host.is_some() {
            cache.known_host_variables(&ctx, host).await?
        } else {
            cache.host_variables(&mut ctx, host).await?
        };
        vars.extend(droplet_vars);
    }

    output::print_json(&vars, cli.pretty)
}
