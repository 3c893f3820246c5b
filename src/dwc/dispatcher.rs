//! Operation dispatcher
//!
//! Composes the tenant API, the inventory cache and the external command
//! adapter. The create/delete/membership/connection/share operations live in
//! the per-resource `ops` modules as `impl Dispatcher` blocks.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::dwc::cache::{ResourceCache, ResourceKind};
use crate::dwc::external::{create_space_args, delete_space_args, ExternalCommandAdapter};
use crate::dwc::resolver::NamePatterns;
use crate::dwc::spaces::{WorkspaceDefinition, WorkspaceRecord};
use crate::dwc::traits::TenantApi;
use crate::dwc::users::UserRecord;
use crate::error::{DwcError, Result};

/// Entry point for every tenant operation
pub struct Dispatcher<A: TenantApi, C: ExternalCommandAdapter> {
    pub(crate) api: A,
    pub(crate) commands: C,
    pub(crate) cache: ResourceCache,
    work_dir: PathBuf,
}

impl<A: TenantApi, C: ExternalCommandAdapter> Dispatcher<A, C> {
    /// Create a dispatcher writing definition files into `work_dir`
    pub fn new(api: A, commands: C, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            commands,
            cache: ResourceCache::new(),
            work_dir: work_dir.into(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Resolve workspace name patterns (case-sensitive)
    pub async fn resolve_workspaces(
        &mut self,
        patterns: &NamePatterns,
        wildcard: bool,
    ) -> Result<Vec<WorkspaceRecord>> {
        self.cache
            .find_workspaces(&mut self.api, patterns, wildcard, false)
            .await
    }

    /// Resolve user patterns (case-insensitive)
    pub async fn resolve_users(
        &mut self,
        patterns: &NamePatterns,
        wildcard: bool,
    ) -> Result<Vec<UserRecord>> {
        self.cache
            .find_users(&mut self.api, patterns, wildcard)
            .await
    }

    /// Reload the workspace inventory after a mutation
    pub async fn refresh_workspaces(&mut self) -> Result<()> {
        let info = self
            .cache
            .load(ResourceKind::Workspaces, &mut self.api, true)
            .await?;
        debug!(
            "Workspace cache refreshed: {} records (generation {})",
            info.len, info.generation
        );
        Ok(())
    }

    /// Create or replace a workspace through the external utility
    pub(crate) async fn push_definition(&self, definition: &WorkspaceDefinition) -> Result<()> {
        let document = definition.to_document()?;
        std::fs::create_dir_all(&self.work_dir)?;
        let path = self
            .work_dir
            .join(format!("{}.json", definition.identifier));
        std::fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        debug!("Wrote workspace definition to {}", path.display());

        let passcode = self.api.passcode().await?;
        let args = create_space_args(self.api.base_url(), &path, &passcode);
        self.commands.run(&args).await?;

        info!("Workspace {} submitted", definition.identifier);
        Ok(())
    }

    /// Delete a workspace through the external utility
    pub(crate) async fn remove_workspace(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(DwcError::InvalidInput("empty workspace name".to_string()));
        }
        let passcode = self.api.passcode().await?;
        let args = delete_space_args(self.api.base_url(), name, &passcode);
        self.commands.run(&args).await?;

        info!("Workspace {} deleted", name);
        Ok(())
    }
}
