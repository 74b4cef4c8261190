//! Snapshot file management
//!
//! Manages the `ansible-digital_ocean.cache` file: one JSON document with the
//! `data`, `index`, and `inventory` sections of a [`SynthesisContext`].
//! Freshness is judged by the file's modification time.

use crate::error::{CloudError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use dbinventory_core::SynthesisContext;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Whether a snapshot written at `modified` is still fresh at `now`
///
/// Fresh iff `modified + max_age > now`.
pub fn is_fresh(modified: DateTime<Utc>, max_age: Duration, now: DateTime<Utc>) -> bool {
    match TimeDelta::from_std(max_age)
        .ok()
        .and_then(|age| modified.checked_add_signed(age))
    {
        Some(expires) => expires > now,
        // beyond chrono's range: never expires
        None => true,
    }
}

/// Reads and writes the snapshot file
pub struct SnapshotStore {
    path: PathBuf,
    pretty: bool,
}

impl SnapshotStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: false,
        }
    }

    /// Indent and sort the written JSON
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the snapshot, `None` when it does not exist
    pub async fn modified(&self) -> Result<Option<DateTime<Utc>>> {
        match fs::metadata(&self.path).await {
            Ok(meta) => Ok(Some(DateTime::<Utc>::from(meta.modified()?))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// A missing snapshot is never fresh
    pub async fn is_fresh(&self, max_age: Duration) -> Result<bool> {
        let fresh = match self.modified().await? {
            Some(modified) => is_fresh(modified, max_age, Utc::now()),
            None => false,
        };
        tracing::debug!(path = %self.path.display(), fresh, "Checked snapshot freshness");
        Ok(fresh)
    }

    /// Load the snapshot verbatim
    pub async fn load(&self) -> Result<SynthesisContext> {
        let content = fs::read_to_string(&self.path).await?;
        let ctx: SynthesisContext = serde_json::from_str(&content).map_err(|e| {
            CloudError::SnapshotError(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            "Loaded snapshot with {} collections and {} groups",
            ctx.data.len(),
            ctx.inventory.len()
        );
        Ok(ctx)
    }

    /// Overwrite the snapshot with `ctx`
    pub async fn save(&self, ctx: &SynthesisContext) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).await?;
                tracing::debug!("Created cache directory: {}", dir.display());
            }
        }

        let content = if self.pretty {
            serde_json::to_string_pretty(ctx)?
        } else {
            serde_json::to_string(ctx)?
        };
        fs::write(&self.path, content).await?;

        tracing::debug!("Saved snapshot with {} groups", ctx.inventory.len());
        Ok(())
    }
}
