//! Ledger error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(
        "Database {} does not exist.\nSpecify a location, or use --db-create to start a new database",
        .0.display()
    )]
    DatabaseMissing(PathBuf),

    #[error("could not add tag `{tag}`, group `{group}` not found")]
    GroupNotFound { tag: String, group: String },

    #[error("Import file '{}' does not exist.", .0.display())]
    ImportFileNotFound(PathBuf),

    #[error(
        "A database secret is required to store or read host passwords (--db-secret or DBINVENTORY_SECRET)"
    )]
    SecretRequired,

    #[error("Cipher error: {0}")]
    Cipher(String),

    #[error("Corrupt ledger data: {0}")]
    Corrupt(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
