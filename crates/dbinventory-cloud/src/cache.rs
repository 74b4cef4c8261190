//! Refresh-versus-reuse policy
//!
//! ```text
//!  refresh && !force_cache ─┐
//!  snapshot stale ──────────┴──► refresh_all ──► save
//!
//!  snapshot fresh ──► load ──┬─ empty ─┬─ force_cache ──► EmptyCache
//!                            │         └─ otherwise ────► refresh_all
//!                            └─ droplet query && !force_cache ──► refresh_droplets
//! ```

use crate::error::{CloudError, Result};
use crate::provider::{InventoryProvider, fetch_all, fetch_sanitized};
use crate::snapshot::SnapshotStore;
use dbinventory_core::{Collection, HostVars, SynthesisContext, sanitize_record};
use std::sync::Arc;
use std::time::Duration;

/// Flags governing cache use for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_age: Duration,

    /// Refetch everything even if the snapshot is fresh
    pub refresh: bool,

    /// Never fetch when a snapshot can be used
    pub force_cache: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(300),
            refresh: false,
            force_cache: false,
        }
    }
}

/// What the caller is about to read from the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    List,
    Host,
    All,
    Collection(Collection),
}

impl Query {
    /// Queries whose answer depends on current droplet status
    pub fn wants_live_droplets(&self) -> bool {
        matches!(
            self,
            Query::List | Query::Host | Query::All | Query::Collection(Collection::Droplets)
        )
    }
}

pub struct CacheManager {
    provider: Arc<dyn InventoryProvider>,
    snapshots: SnapshotStore,
    policy: CachePolicy,
}

impl CacheManager {
    pub fn new(
        provider: Arc<dyn InventoryProvider>,
        snapshots: SnapshotStore,
        policy: CachePolicy,
    ) -> Self {
        Self {
            provider,
            snapshots,
            policy,
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Produce a context for `query`, fetching as little as the policy allows
    pub async fn load(&self, query: Query) -> Result<SynthesisContext> {
        let fresh = self.snapshots.is_fresh(self.policy.max_age).await?;

        if (self.policy.refresh && !self.policy.force_cache) || !fresh {
            tracing::info!(refresh = self.policy.refresh, fresh, "Refreshing from provider");
            return self.refresh_all().await;
        }

        let mut ctx = self.snapshots.load().await?;
        if ctx.is_empty() {
            if self.policy.force_cache {
                return Err(CloudError::EmptyCache);
            }
            tracing::info!("Snapshot is empty, refreshing from provider");
            return self.refresh_all().await;
        }

        if !self.policy.force_cache && query.wants_live_droplets() {
            self.refresh_droplets(&mut ctx).await?;
        }

        Ok(ctx)
    }

    /// Refetch every collection, resynthesize, and overwrite the snapshot
    pub async fn refresh_all(&self) -> Result<SynthesisContext> {
        let data = fetch_all(self.provider.as_ref()).await?;
        let ctx = SynthesisContext::from_collections(data);
        self.snapshots.save(&ctx).await?;
        Ok(ctx)
    }

    /// Refetch droplets only, keeping the other cached collections
    pub async fn refresh_droplets(&self, ctx: &mut SynthesisContext) -> Result<()> {
        let droplets = fetch_sanitized(self.provider.as_ref(), Collection::Droplets).await?;
        ctx.replace_droplets(droplets);
        ctx.refreshed = true;
        self.snapshots.save(ctx).await
    }

    /// `do_` variables for a host
    ///
    /// An address unknown to the snapshot triggers a full refresh (unless
    /// force-cache is set); still unknown after that means the droplet is
    /// gone and the result is empty.
    pub async fn host_variables(
        &self,
        ctx: &mut SynthesisContext,
        host: &str,
    ) -> Result<HostVars> {
        if ctx.droplet_id_for(host).is_none() && !self.policy.force_cache {
            tracing::debug!(host, "Host not in snapshot, refreshing");
            *ctx = self.refresh_all().await?;
        }
        self.known_host_variables(ctx, host).await
    }

    /// `do_` variables for a host the snapshot already knows, empty otherwise
    ///
    /// Never refreshes on a miss. Used for addresses that resolve elsewhere
    /// (the ledger) and may have no droplet at all.
    pub async fn known_host_variables(
        &self,
        ctx: &SynthesisContext,
        host: &str,
    ) -> Result<HostVars> {
        let Some(droplet_id) = ctx.droplet_id_for(host) else {
            tracing::debug!(host, "Host not found");
            return Ok(HostVars::new());
        };

        let droplet = if ctx.refreshed || self.policy.force_cache {
            ctx.droplet_by_address(host).cloned()
        } else {
            self.provider
                .show_droplet(droplet_id)
                .await?
                .map(|raw| sanitize_record(&raw))
        };

        Ok(droplet
            .map(|d| ctx.droplet_variables(&d))
            .unwrap_or_default())
    }
}
