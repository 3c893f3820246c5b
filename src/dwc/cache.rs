//! Workspace and user inventory cache
//!
//! Each inventory is loaded on first use and kept for the whole process. A
//! snapshot is only replaced by an explicit forced reload; the replacement is
//! built completely before it is swapped in, so a failed reload keeps the
//! previous snapshot. Records leave the cache as copies only.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fmt;

use crate::dwc::resolver::{self, NamePatterns};
use crate::dwc::spaces::WorkspaceRecord;
use crate::dwc::traits::TenantApi;
use crate::dwc::users::UserRecord;
use crate::error::{DwcError, Result};

/// Inventories the cache holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Workspaces,
    Users,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Workspaces => write!(f, "workspaces"),
            ResourceKind::Users => write!(f, "users"),
        }
    }
}

/// Point-in-time copy of one inventory
#[derive(Debug, Clone)]
struct Snapshot<T> {
    records: Vec<T>,
    generation: u64,
    fetched_at: DateTime<Utc>,
}

/// Freshness marker of a loaded snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
    pub len: usize,
}

/// Lazily loaded workspace and user inventories
#[derive(Debug, Default)]
pub struct ResourceCache {
    workspaces: Option<Snapshot<WorkspaceRecord>>,
    users: Option<Snapshot<UserRecord>>,
    generation: u64,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an inventory unless a snapshot exists and `force` is false
    pub async fn load<A: TenantApi + ?Sized>(
        &mut self,
        kind: ResourceKind,
        api: &mut A,
        force: bool,
    ) -> Result<SnapshotInfo> {
        let loaded = match kind {
            ResourceKind::Workspaces => self.workspaces.is_some(),
            ResourceKind::Users => self.users.is_some(),
        };

        if force || !loaded {
            match kind {
                ResourceKind::Workspaces => {
                    let records = fetch_enriched_workspaces(api).await?;
                    self.workspaces = Some(self.snapshot(records));
                }
                ResourceKind::Users => {
                    let records = api.fetch_users().await?;
                    self.users = Some(self.snapshot(records));
                }
            }
        }

        self.info(kind).ok_or_else(|| {
            DwcError::Config(format!("{} snapshot missing after load", kind))
        })
    }

    /// Freshness of a snapshot, `None` before the first load
    pub fn info(&self, kind: ResourceKind) -> Option<SnapshotInfo> {
        match kind {
            ResourceKind::Workspaces => self.workspaces.as_ref().map(Snapshot::info),
            ResourceKind::Users => self.users.as_ref().map(Snapshot::info),
        }
    }

    /// Copy of every cached workspace
    pub async fn workspaces<A: TenantApi + ?Sized>(
        &mut self,
        api: &mut A,
        force: bool,
    ) -> Result<Vec<WorkspaceRecord>> {
        self.find_workspaces(api, &NamePatterns::all(), true, force)
            .await
    }

    /// Resolve workspace name patterns against the snapshot
    pub async fn find_workspaces<A: TenantApi + ?Sized>(
        &mut self,
        api: &mut A,
        patterns: &NamePatterns,
        wildcard: bool,
        force: bool,
    ) -> Result<Vec<WorkspaceRecord>> {
        self.load(ResourceKind::Workspaces, api, force).await?;
        let records = self
            .workspaces
            .as_ref()
            .map(|s| s.records.as_slice())
            .unwrap_or_default();
        Ok(resolver::resolve(records, patterns, wildcard))
    }

    /// Exact lookup of one workspace by technical name
    pub async fn find_workspace<A: TenantApi + ?Sized>(
        &mut self,
        api: &mut A,
        name: &str,
    ) -> Result<Option<WorkspaceRecord>> {
        Ok(self
            .find_workspaces(api, &NamePatterns::from(name), false, false)
            .await?
            .into_iter()
            .next())
    }

    /// Resolve user patterns (case-insensitive) against the snapshot
    pub async fn find_users<A: TenantApi + ?Sized>(
        &mut self,
        api: &mut A,
        patterns: &NamePatterns,
        wildcard: bool,
    ) -> Result<Vec<UserRecord>> {
        self.load(ResourceKind::Users, api, false).await?;
        let records = self
            .users
            .as_ref()
            .map(|s| s.records.as_slice())
            .unwrap_or_default();
        Ok(resolver::resolve(records, patterns, wildcard))
    }

    fn snapshot<T>(&mut self, records: Vec<T>) -> Snapshot<T> {
        self.generation += 1;
        debug!(
            "Cached {} records (generation {})",
            records.len(),
            self.generation
        );
        Snapshot {
            records,
            generation: self.generation,
            fetched_at: Utc::now(),
        }
    }
}

impl<T> Snapshot<T> {
    fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            generation: self.generation,
            fetched_at: self.fetched_at,
            len: self.records.len(),
        }
    }
}

/// Inventory plus consumption; a failed consumption query leaves every
/// workspace without resource data instead of failing the load
async fn fetch_enriched_workspaces<A: TenantApi + ?Sized>(
    api: &mut A,
) -> Result<Vec<WorkspaceRecord>> {
    let mut records = api.fetch_workspaces().await?;

    let consumption = match api.fetch_workspace_consumption().await {
        Ok(consumption) => consumption,
        Err(e) => {
            warn!("Workspace consumption unavailable: {}", e);
            Default::default()
        }
    };

    for record in &mut records {
        record.resources = consumption.get(&record.name).cloned();
    }
    Ok(records)
}
