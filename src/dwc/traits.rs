//! Common traits for tenant resources and the tenant API seam

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::dwc::connections::ConnectionRecord;
use crate::dwc::shares::{SharePayload, ShareTarget};
use crate::dwc::spaces::{WorkspaceDefinition, WorkspaceRecord};
use crate::dwc::users::{UserInfo, UserRecord};
use crate::error::Result;

/// Common trait for tenant resources (workspaces, users, connections)
///
/// Provides a unified interface for identification and matching.
pub trait TenantResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the technical name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    ///
    /// Default implementation checks for exact match on either field.
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// Remote operations the engine needs from a tenant
///
/// Implemented by `SessionContext` over HTTP; tests substitute an in-memory
/// fake so cache, resolver and dispatcher logic runs without a network.
#[async_trait]
pub trait TenantApi: Send + Sync {
    /// Tenant URL
    fn base_url(&self) -> &str;

    /// Identity of the logged-in user (fetched once, then cached)
    async fn user_info(&mut self) -> Result<UserInfo>;

    /// Workspace inventory
    async fn fetch_workspaces(&self) -> Result<Vec<WorkspaceRecord>>;

    /// Consumption records keyed by workspace name
    async fn fetch_workspace_consumption(&self) -> Result<HashMap<String, Value>>;

    /// Full definition of one workspace; `None` when the tenant has none
    async fn fetch_workspace_definition(&self, name: &str)
        -> Result<Option<WorkspaceDefinition>>;

    /// User inventory
    async fn fetch_users(&mut self) -> Result<Vec<UserRecord>>;

    /// Connections of a workspace
    async fn fetch_connections(&self, space_id: &str) -> Result<Vec<ConnectionRecord>>;

    async fn create_connection(&self, space_id: &str, definition: &Value) -> Result<()>;

    async fn delete_connection(&self, space_id: &str, connection_id: &str) -> Result<()>;

    /// Share targets per object name
    async fn fetch_shares(
        &self,
        space_name: &str,
        object_names: &[String],
    ) -> Result<BTreeMap<String, Vec<ShareTarget>>>;

    async fn create_share(&self, payload: &SharePayload) -> Result<()>;

    /// Data builder objects, optionally restricted to a workspace and to shared ones
    async fn fetch_builder_objects(
        &mut self,
        space_name: Option<&str>,
        shared_only: bool,
    ) -> Result<Vec<Value>>;

    async fn fetch_remote_tables(&self, space_name: &str) -> Result<Vec<Value>>;

    async fn fetch_business_builder_objects(&self, space_name: &str) -> Result<Vec<Value>>;

    /// Schema objects visible to the given data access users
    async fn fetch_schema_objects(
        &mut self,
        space_name: &str,
        dbusers: &[String],
    ) -> Result<Vec<Value>>;

    /// One-time passcode for the external command-line utility
    async fn passcode(&self) -> Result<String>;
}
