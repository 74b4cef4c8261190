use crate::Cli;
use crate::output;
use dbinventory_cloud::{CacheManager, CachePolicy, Query, SnapshotStore};
use dbinventory_cloud_digitalocean::DigitalOceanProvider;
use dbinventory_config::{Credentials, Settings};
use std::sync::Arc;

/// `--env`: show the resolved DigitalOcean credentials
pub fn env(settings: &Settings) -> anyhow::Result<()> {
    let credentials = settings.require_credentials()?;
    println!(
        "DO_CLIENT_ID={} DO_API_KEY={}",
        credentials.client_id, credentials.api_key
    );
    Ok(())
}

/// Cache manager over the DigitalOcean provider
pub fn cache_manager(cli: &Cli, settings: &Settings, credentials: &Credentials) -> CacheManager {
    let provider = DigitalOceanProvider::new(&credentials.client_id, &credentials.api_key);
    let snapshots = SnapshotStore::new(settings.cache.file()).with_pretty(cli.pretty);
    let policy = CachePolicy {
        max_age: settings.cache.max_age,
        refresh: cli.refresh_cache,
        force_cache: cli.force_cache,
    };
    tracing::debug!(?policy, cache = %settings.cache.file().display(), "Using provider cache");
    CacheManager::new(Arc::new(provider), snapshots, policy)
}

/// `--droplets`, `--regions`, ... and `--all`: dump provider collections
pub async fn handle(cli: &Cli, settings: &Settings, query: Query) -> anyhow::Result<()> {
    let credentials = settings.require_credentials()?;
    let cache = cache_manager(cli, settings, credentials);
    let ctx = cache.load(query).await?;

    let only = match query {
        Query::Collection(collection) => Some(collection),
        _ => None,
    };
    output::print_json(&ctx.collections_json(only), cli.pretty)
}
