//! Workspace operations: create, delete, list and membership

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::config::quota;
use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::TenantApi;
use crate::error::{DwcError, Result};

use super::models::{
    MemberRow, SpaceDefinition, SpaceMember, WorkspaceDefinition, WorkspaceDetail,
};
use super::validate::{validate_space_id, validate_space_label};

/// Parameters of a workspace create
#[derive(Debug, Clone, Default)]
pub struct CreateSpaceRequest {
    /// Requested name; normalized into the technical identifier
    pub name: String,
    pub label: Option<Value>,
    /// Existing workspace whose definition is copied
    pub template: Option<String>,
    /// Storage quota in units (overrides default and template)
    pub disk: Option<f64>,
    /// Memory quota in units (overrides default and template)
    pub memory: Option<f64>,
    /// User patterns to add as members
    pub users: Vec<String>,
    pub force: bool,
}

/// Membership change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Add,
    Remove,
}

impl<A: TenantApi, C: ExternalCommandAdapter> Dispatcher<A, C> {
    /// Create a workspace, replacing an existing one when `force` is set
    ///
    /// Replacement is a delete followed by a create with nothing tying the two
    /// together: if the create fails the workspace is gone and the error is a
    /// `PartialFailure`.
    pub async fn create_space(&mut self, request: &CreateSpaceRequest) -> Result<WorkspaceDefinition> {
        let id = validate_space_id(&request.name)?;
        let label = validate_space_label(&id, request.label.as_ref());

        let existing = self.cache.find_workspace(&mut self.api, &id).await?;
        if existing.is_some() && !request.force {
            warn!("Workspace {} already exists - specify force", id);
            return Err(DwcError::AlreadyExists(format!("workspace '{}'", id)));
        }

        let mut definition = match &request.template {
            Some(template) => self.template_definition(&id, template).await?,
            None => SpaceDefinition::with_defaults(&label),
        };
        definition.label = Some(Value::String(label));
        definition.members.clear();

        if let Some(disk) = request.disk {
            definition.assigned_storage = Some(quota::to_base_units(disk));
        }
        if let Some(memory) = request.memory {
            definition.assigned_ram = Some(quota::to_base_units(memory));
        }

        // No user patterns selects every tenant user
        let users = self
            .resolve_users(&NamePatterns::from(request.users.as_slice()), true)
            .await?;
        if users.is_empty() {
            warn!("Workspace {}: no matching users found", id);
        }
        for user in users {
            if !definition.has_member(&user.user_name) {
                definition.members.push(SpaceMember::user(&user.user_name));
            }
        }

        let definition = WorkspaceDefinition::new(&id, definition);

        if existing.is_some() {
            info!("Workspace {} forced create - deleting existing workspace", id);
            self.remove_workspace(&id).await?;
            if let Err(e) = self.push_definition(&definition).await {
                error!("Workspace {} was deleted but could not be re-created: {}", id, e);
                self.refresh_after_mutation().await;
                return Err(DwcError::PartialFailure(format!(
                    "workspace '{}' deleted, re-create failed: {}",
                    id, e
                )));
            }
        } else {
            self.push_definition(&definition).await?;
        }

        self.refresh_after_mutation().await;
        info!("Workspace {} creation complete", id);
        Ok(definition)
    }

    /// Definition of a template workspace, deep-copied for a new workspace
    async fn template_definition(&mut self, id: &str, template: &str) -> Result<SpaceDefinition> {
        let matches = self
            .resolve_workspaces(&NamePatterns::from(template), false)
            .await?;
        let [template_space] = matches.as_slice() else {
            return Err(DwcError::InvalidInput(format!(
                "template workspace '{}' for {} not found",
                template, id
            )));
        };

        self.api
            .fetch_workspace_definition(&template_space.name)
            .await?
            .map(|def| def.definition)
            .ok_or_else(|| {
                DwcError::InvalidInput(format!(
                    "template workspace '{}' has no definition",
                    template
                ))
            })
    }

    /// Delete every workspace matching the patterns
    ///
    /// Names absent from the inventory are warned about and skipped; a failed
    /// delete is logged and the batch continues. Returns the deleted names.
    pub async fn delete_spaces(
        &mut self,
        patterns: &NamePatterns,
        wildcard: bool,
    ) -> Result<Vec<String>> {
        if patterns.is_all() {
            return Err(DwcError::InvalidInput(
                "no workspace names given to delete".to_string(),
            ));
        }

        let targets = self.resolve_workspaces(patterns, wildcard).await?;
        if targets.is_empty() {
            warn!("No workspaces found to delete");
            return Ok(Vec::new());
        }

        let mut deleted = Vec::new();
        for target in targets {
            if deleted.contains(&target.name) {
                continue;
            }
            match self.remove_workspace(&target.name).await {
                Ok(()) => deleted.push(target.name),
                Err(e) => error!("Failed to delete workspace {}: {}", target.name, e),
            }
        }

        if !deleted.is_empty() {
            self.refresh_after_mutation().await;
        }
        Ok(deleted)
    }

    /// Workspaces with definition and auxiliary object lists
    ///
    /// A failing detail query leaves that part empty.
    pub async fn list_spaces(
        &mut self,
        patterns: &NamePatterns,
        wildcard: bool,
    ) -> Result<Vec<WorkspaceDetail>> {
        let spaces = self.resolve_workspaces(patterns, wildcard).await?;
        let mut details = Vec::with_capacity(spaces.len());

        for space in spaces {
            let name = space.name.clone();
            debug!("Collecting details for workspace {}", name);
            let mut detail = WorkspaceDetail::new(space);

            match self.api.fetch_workspace_definition(&name).await {
                Ok(def) => detail.definition = def.map(|d| d.definition),
                Err(e) => warn!("Definition of {} unavailable: {}", name, e),
            }

            let dbusers = detail
                .definition
                .as_ref()
                .map(SpaceDefinition::dbuser_names)
                .unwrap_or_default();
            match self.api.fetch_schema_objects(&name, &dbusers).await {
                Ok(objects) => {
                    detail.dbuser_objects = objects.into_iter().map(tag_dbuser).collect()
                }
                Err(e) => warn!("Schema objects of {} unavailable: {}", name, e),
            }

            match self.api.fetch_builder_objects(Some(&name), false).await {
                Ok(objects) => detail.data_builder = objects,
                Err(e) => warn!("Data builder objects of {} unavailable: {}", name, e),
            }

            match self.api.fetch_remote_tables(&name).await {
                Ok(tables) => detail.remote_tables = tables,
                Err(e) => warn!("Remote tables of {} unavailable: {}", name, e),
            }

            match self.api.fetch_business_builder_objects(&name).await {
                Ok(objects) => {
                    detail.business_builder = objects
                        .into_iter()
                        .map(|mut object| {
                            if let Value::Object(map) = &mut object {
                                map.insert("space_name".to_string(), Value::String(name.clone()));
                            }
                            object
                        })
                        .collect()
                }
                Err(e) => warn!("Business builder objects of {} unavailable: {}", name, e),
            }

            details.push(detail);
        }

        if details.is_empty() {
            warn!("No workspaces found");
        }
        Ok(details)
    }

    /// Members of every matching workspace
    pub async fn list_members(
        &mut self,
        patterns: &NamePatterns,
        wildcard: bool,
    ) -> Result<Vec<MemberRow>> {
        let spaces = self.resolve_workspaces(patterns, wildcard).await?;
        let mut rows = Vec::new();

        for space in spaces {
            let Some(def) = self.api.fetch_workspace_definition(&space.name).await? else {
                warn!("Workspace {} has no definition", space.name);
                continue;
            };
            rows.extend(def.definition.members.into_iter().map(|m| MemberRow {
                space_name: space.name.clone(),
                name: m.name,
                kind: m.kind,
            }));
        }
        Ok(rows)
    }

    /// Add or remove users on one workspace; returns the number of changes
    pub async fn change_members(
        &mut self,
        space_name: &str,
        users: &NamePatterns,
        wildcard: bool,
        action: MembershipChange,
    ) -> Result<usize> {
        let id = space_name.to_uppercase();
        if self.cache.find_workspace(&mut self.api, &id).await?.is_none() {
            return Err(DwcError::NotFound(format!("workspace '{}'", id)));
        }
        if users.is_all() {
            return Err(DwcError::InvalidInput("no users given".to_string()));
        }

        let users = self.resolve_users(users, wildcard).await?;
        if users.is_empty() {
            return Err(DwcError::NotFound("no matching users".to_string()));
        }

        let mut def = self
            .api
            .fetch_workspace_definition(&id)
            .await?
            .ok_or_else(|| DwcError::NotFound(format!("definition of workspace '{}'", id)))?;

        let mut changes = 0;
        for user in &users {
            let member = def.definition.has_member(&user.user_name);
            match action {
                MembershipChange::Add if member => {
                    info!("{} is already a member of {}", user.user_name, id)
                }
                MembershipChange::Add => {
                    def.definition.members.push(SpaceMember::user(&user.user_name));
                    changes += 1;
                }
                MembershipChange::Remove if !member => {
                    info!("{} is not a member of {}", user.user_name, id)
                }
                MembershipChange::Remove => {
                    def.definition.members.retain(|m| m.name != user.user_name);
                    changes += 1;
                }
            }
        }

        if changes > 0 {
            self.push_definition(&def).await?;
            self.refresh_after_mutation().await;
        }
        Ok(changes)
    }

    /// Reload the inventory; a failed reload only leaves a stale snapshot
    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh_workspaces().await {
            warn!("Workspace inventory refresh failed: {}", e);
        }
    }
}

/// Add the owning data access user (`id` up to the first `.`)
fn tag_dbuser(mut object: Value) -> Value {
    let owner = object
        .get("id")
        .and_then(|id| id.as_str())
        .map(|id| id.split('.').next().unwrap_or(id).to_string());
    if let (Some(owner), Value::Object(map)) = (owner, &mut object) {
        map.insert("dbuser".to_string(), Value::String(owner));
    }
    object
}
