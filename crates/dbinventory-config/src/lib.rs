pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_PATH_ENV: &str = "DBINVENTORY_PATH";
pub const DB_SECRET_ENV: &str = "DBINVENTORY_SECRET";
pub const CLIENT_ID_ENV: &str = "DO_CLIENT_ID";
pub const API_KEY_ENV: &str = "DO_API_KEY";
pub const CACHE_PATH_ENV: &str = "DO_CACHE_PATH";
pub const CACHE_MAX_AGE_ENV: &str = "DO_CACHE_MAX_AGE";

pub const DEFAULT_DB_FILE: &str = "hosts.sqlite3";
pub const CACHE_FILE: &str = "ansible-digital_ocean.cache";
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300;

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub db_path: Option<PathBuf>,
    pub db_secret: Option<String>,
    pub client_id: Option<String>,
    pub api_key: Option<String>,
    pub cache_path: Option<PathBuf>,
    pub cache_max_age: Option<u64>,
}

/// DigitalOcean API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("api_key", &"***")
            .finish()
    }
}

/// Where the provider snapshot lives and how long it stays fresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub dir: PathBuf,
    pub max_age: Duration,
}

impl CacheSettings {
    pub fn file(&self) -> PathBuf {
        self.dir.join(CACHE_FILE)
    }
}

/// Fully resolved configuration for one run
#[derive(Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    pub db_secret: Option<String>,
    pub credentials: Option<Credentials>,
    pub cache: CacheSettings,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("db_path", &self.db_path)
            .field("db_secret", &self.db_secret.as_ref().map(|_| "***"))
            .field("credentials", &self.credentials)
            .field("cache", &self.cache)
            .finish()
    }
}

impl Settings {
    /// Resolve every setting as explicit flag > environment variable > default
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let settings = Self {
            db_path: resolve_db_path(overrides.db_path.as_deref())?,
            db_secret: resolve_secret(overrides.db_secret.as_deref()),
            credentials: resolve_credentials(
                overrides.client_id.as_deref(),
                overrides.api_key.as_deref(),
            ),
            cache: resolve_cache(overrides.cache_path.as_deref(), overrides.cache_max_age)?,
        };
        tracing::debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    /// Credentials, or an error explaining how to supply them
    pub fn require_credentials(&self) -> Result<&Credentials> {
        self.credentials.as_ref().ok_or(ConfigError::CredentialsMissing)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Locate the ledger database
///
/// Priority:
/// 1. `--db-path`
/// 2. `DBINVENTORY_PATH`
/// 3. `<current directory>/hosts.sqlite3`
pub fn resolve_db_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env_var(DB_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(std::env::current_dir()?.join(DEFAULT_DB_FILE))
}

/// `--db-secret`, else `DBINVENTORY_SECRET`
pub fn resolve_secret(flag: Option<&str>) -> Option<String> {
    flag.map(str::to_string).or_else(|| env_var(DB_SECRET_ENV))
}

/// Credentials are only usable when both halves resolve
pub fn resolve_credentials(client_id: Option<&str>, api_key: Option<&str>) -> Option<Credentials> {
    let client_id = client_id.map(str::to_string).or_else(|| env_var(CLIENT_ID_ENV))?;
    let api_key = api_key.map(str::to_string).or_else(|| env_var(API_KEY_ENV))?;
    Some(Credentials { client_id, api_key })
}

/// Snapshot directory and max age
///
/// Defaults to the current directory and 300 seconds.
pub fn resolve_cache(path: Option<&Path>, max_age: Option<u64>) -> Result<CacheSettings> {
    let dir = match path {
        Some(path) => path.to_path_buf(),
        None => match env_var(CACHE_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => std::env::current_dir()?,
        },
    };

    let max_age = match max_age {
        Some(secs) => secs,
        None => match env_var(CACHE_MAX_AGE_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: CACHE_MAX_AGE_ENV,
                value,
            })?,
            None => DEFAULT_CACHE_MAX_AGE_SECS,
        },
    };

    Ok(CacheSettings {
        dir,
        max_age: Duration::from_secs(max_age),
    })
}
