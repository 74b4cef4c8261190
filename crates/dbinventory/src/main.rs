mod commands;
mod output;

use clap::Parser;
use colored::Colorize;
use dbinventory_cloud::Query;
use dbinventory_config::{Overrides, Settings};
use dbinventory_core::Collection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dbinventory")]
#[command(
    about = "Produce an Ansible inventory from a SQLite host ledger and DigitalOcean",
    long_about = None,
    version
)]
struct Cli {
    /// List all active hosts (default)
    #[arg(long, conflicts_with_all = ["host", "manage", "add"])]
    list: bool,

    /// Get all Ansible inventory variables about a specific host
    #[arg(long, value_name = "HOST", conflicts_with_all = ["manage", "add"])]
    host: Option<String>,

    /// Show the hosts, tags and groups held in the ledger
    #[arg(short, long, conflicts_with = "add")]
    manage: bool,

    /// Add a host to the ledger
    #[arg(short, long, requires = "address")]
    add: bool,

    /// Address of the host to add (hostname or IP)
    #[arg(long)]
    address: Option<String>,

    /// Display name of the host to add
    #[arg(long)]
    name: Option<String>,

    /// SSH user of the host to add
    #[arg(long)]
    ssh_user: Option<String>,

    /// SSH port of the host to add
    #[arg(long)]
    ssh_port: Option<u16>,

    /// Tag to attach to the host to add (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// SSH password of the host to add, stored encrypted
    #[arg(long)]
    ssh_pass: Option<String>,

    /// Path to the hosts database file [env: DBINVENTORY_PATH] [default: ./hosts.sqlite3]
    #[arg(short = 'd', long)]
    db_path: Option<PathBuf>,

    /// Create the database if it does not already exist
    #[arg(short = 'c', long)]
    db_create: bool,

    /// JSON file containing groups, tags and hosts to import
    #[arg(short = 'i', long, value_name = "FILE")]
    db_import: Option<PathBuf>,

    /// Export groups, tags and hosts as JSON
    #[arg(short = 'e', long)]
    db_export: bool,

    /// Database secret for host password encryption [env: DBINVENTORY_SECRET]
    #[arg(short = 's', long)]
    db_secret: Option<String>,

    /// List all DigitalOcean droplets
    #[arg(long, group = "collection")]
    droplets: bool,

    /// List all DigitalOcean regions
    #[arg(long, group = "collection")]
    regions: bool,

    /// List all DigitalOcean images
    #[arg(long, group = "collection")]
    images: bool,

    /// List all DigitalOcean sizes
    #[arg(long, group = "collection")]
    sizes: bool,

    /// List all DigitalOcean SSH keys
    #[arg(long, group = "collection")]
    ssh_keys: bool,

    /// List all DigitalOcean domains
    #[arg(long, group = "collection")]
    domains: bool,

    /// List all DigitalOcean information as JSON
    #[arg(long, group = "collection")]
    all: bool,

    /// Directory of the provider cache file [env: DO_CACHE_PATH]
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// Maximum age of the cached provider data, in seconds [env: DO_CACHE_MAX_AGE]
    #[arg(long, value_name = "SECONDS")]
    cache_max_age: Option<u64>,

    /// Force a refresh of the cache by making API requests to DigitalOcean
    #[arg(long, conflicts_with = "force_cache")]
    refresh_cache: bool,

    /// Only use data from the cache
    #[arg(long)]
    force_cache: bool,

    /// DigitalOcean client id [env: DO_CLIENT_ID]
    #[arg(long)]
    client_id: Option<String>,

    /// DigitalOcean API key [env: DO_API_KEY]
    #[arg(long)]
    api_key: Option<String>,

    /// Display DO_CLIENT_ID and DO_API_KEY
    #[arg(long)]
    env: bool,

    /// Pretty-print results
    #[arg(short, long)]
    pretty: bool,
}

/// What a run prints
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Env,
    Provider(Query),
    Add,
    Manage,
    Host(String),
    List,
}

impl Cli {
    fn action(&self) -> Action {
        if self.env {
            return Action::Env;
        }
        if let Some(collection) = self.collection() {
            return Action::Provider(Query::Collection(collection));
        }
        if self.all {
            return Action::Provider(Query::All);
        }
        if self.add {
            return Action::Add;
        }
        if self.manage {
            return Action::Manage;
        }
        match &self.host {
            Some(host) => Action::Host(host.clone()),
            None => Action::List,
        }
    }

    fn collection(&self) -> Option<Collection> {
        [
            (self.droplets, Collection::Droplets),
            (self.regions, Collection::Regions),
            (self.images, Collection::Images),
            (self.sizes, Collection::Sizes),
            (self.ssh_keys, Collection::SshKeys),
            (self.domains, Collection::Domains),
        ]
        .into_iter()
        .find_map(|(set, collection)| set.then_some(collection))
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            db_path: self.db_path.clone(),
            db_secret: self.db_secret.clone(),
            client_id: self.client_id.clone(),
            api_key: self.api_key.clone(),
            cache_path: self.cache_path.clone(),
            cache_max_age: self.cache_max_age,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the inventory JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::resolve(&cli.overrides())?;
    let action = cli.action();
    tracing::debug!(?action, "Dispatching");

    match action {
        Action::Env => commands::provider::env(&settings),
        Action::Provider(query) => commands::provider::handle(&cli, &settings, query).await,
        action => {
            let store = commands::ledger::open(&cli, &settings)?;
            if cli.db_export {
                return commands::ledger::export(&store, cli.pretty);
            }

            match action {
                Action::Add => commands::add::handle(&cli, &settings, &store),
                Action::Manage => commands::manage::handle(&store),
                Action::Host(host) => commands::host::handle(&cli, &settings, &store, &host).await,
                _ => commands::list::handle(&cli, &settings, &store).await,
            }
        }
    }
}
