//! Connection operations across resolved workspaces

use log::{error, info, warn};

use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::{TenantApi, TenantResource};
use crate::error::{DwcError, Result};

use super::models::{ConnectionDefinition, ConnectionRecord};

impl<A: TenantApi, C: ExternalCommandAdapter> Dispatcher<A, C> {
    /// Connections of every matching workspace, optionally only one name
    pub async fn list_connections(
        &mut self,
        spaces: &NamePatterns,
        wildcard: bool,
        connection: Option<&str>,
    ) -> Result<Vec<ConnectionRecord>> {
        let spaces = self.resolve_workspaces(spaces, wildcard).await?;
        let mut records = Vec::new();

        for space in spaces {
            let connections = self.api.fetch_connections(&space.id).await?;
            records.extend(
                connections
                    .into_iter()
                    .filter(|c| connection.map_or(true, |name| c.name == name)),
            );
        }
        Ok(records)
    }

    /// Create a connection in every matching workspace
    ///
    /// An existing connection of the same name is replaced (delete, then
    /// create) only with `force`; a create failing after that delete is a
    /// `PartialFailure`. Failures are per workspace; the result is an error
    /// only if no workspace got the connection.
    pub async fn create_connections(
        &mut self,
        spaces: &NamePatterns,
        wildcard: bool,
        definition: &ConnectionDefinition,
        force: bool,
    ) -> Result<Vec<String>> {
        let spaces = self.resolve_workspaces(spaces, wildcard).await?;
        if spaces.is_empty() {
            return Err(DwcError::NotFound("no matching workspaces".to_string()));
        }

        let mut created = Vec::new();
        let mut last_error = None;

        for space in &spaces {
            match self.create_connection_in(&space.id, definition, force).await {
                Ok(()) => {
                    info!("Connection {} created in {}", definition.name(), space.name);
                    created.push(space.name.clone());
                }
                Err(e) => {
                    error!(
                        "Connection {} not created in {}: {}",
                        definition.name(),
                        space.name,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if created.is_empty() => Err(e),
            _ => Ok(created),
        }
    }

    async fn create_connection_in(
        &self,
        space_id: &str,
        definition: &ConnectionDefinition,
        force: bool,
    ) -> Result<()> {
        let existing = self.api.fetch_connections(space_id).await?;
        if let Some(current) = existing.iter().find(|c| c.name() == definition.name()) {
            if !force {
                return Err(DwcError::AlreadyExists(format!(
                    "connection '{}' - specify force",
                    definition.name()
                )));
            }
            info!("Replacing connection {}", definition.name());
            self.api.delete_connection(space_id, current.id()).await?;
            return self
                .api
                .create_connection(space_id, definition.body())
                .await
                .map_err(|e| {
                    error!(
                        "Connection {} was deleted but could not be re-created: {}",
                        definition.name(),
                        e
                    );
                    DwcError::PartialFailure(format!(
                        "connection '{}' deleted, re-create failed: {}",
                        definition.name(),
                        e
                    ))
                });
        }
        self.api.create_connection(space_id, definition.body()).await
    }

    /// Delete the named connection from every matching workspace
    ///
    /// Workspaces without the connection are skipped. Returns the names of
    /// the workspaces the connection was removed from.
    pub async fn delete_connections(
        &mut self,
        spaces: &NamePatterns,
        wildcard: bool,
        connection: &str,
    ) -> Result<Vec<String>> {
        let spaces = self.resolve_workspaces(spaces, wildcard).await?;
        let mut deleted = Vec::new();

        for space in spaces {
            let connections = self.api.fetch_connections(&space.id).await?;
            let Some(target) = connections.iter().find(|c| c.name == connection) else {
                warn!("Connection {} not found in {}", connection, space.name);
                continue;
            };
            match self.api.delete_connection(&space.id, &target.id).await {
                Ok(()) => deleted.push(space.name),
                Err(e) => error!("Failed to delete {} in {}: {}", connection, space.name, e),
            }
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwc::testing::{connection, entries, workspace, CallLog, FakeTenant, RecordingAdapter};
    use serde_json::json;

    fn dispatcher() -> (Dispatcher<FakeTenant, RecordingAdapter>, CallLog) {
        let calls = CallLog::default();
        let mut tenant = FakeTenant::new(calls.clone()).with_workspaces(vec![
            workspace("sp-1", "SALES"),
            workspace("sp-2", "SALES_EU"),
            workspace("sp-3", "HR"),
        ]);
        tenant
            .connections
            .insert("sp-1".to_string(), vec![connection("c-1", "HANA"), connection("c-2", "S3")]);
        tenant
            .connections
            .insert("sp-3".to_string(), vec![connection("c-9", "HANA")]);
        let dispatcher = Dispatcher::new(tenant, RecordingAdapter::new(calls.clone()), "w");
        (dispatcher, calls)
    }

    fn definition(name: &str) -> ConnectionDefinition {
        ConnectionDefinition::from_value(json!({"data": {"name": name}})).unwrap()
    }

    fn mutations(calls: &CallLog) -> Vec<String> {
        entries(calls)
            .into_iter()
            .filter(|c| c.starts_with("POST") || c.starts_with("DELETE"))
            .collect()
    }

    #[tokio::test]
    async fn test_list_connections_with_filter() {
        let (mut d, _) = dispatcher();
        let all = d
            .list_connections(&NamePatterns::all(), true, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let hana = d
            .list_connections(&NamePatterns::all(), true, Some("HANA"))
            .await
            .unwrap();
        assert_eq!(hana.len(), 2);
        assert!(hana.iter().all(|c| c.name == "HANA"));
    }

    #[tokio::test]
    async fn test_create_new_connection() {
        let (mut d, calls) = dispatcher();
        let created = d
            .create_connections(&NamePatterns::from("SALES"), true, &definition("ORACLE"), false)
            .await
            .unwrap();
        assert_eq!(created, vec!["SALES", "SALES_EU"]);
        assert_eq!(
            mutations(&calls),
            vec![
                "POST connection sp-1 \"ORACLE\"",
                "POST connection sp-2 \"ORACLE\""
            ]
        );
    }

    #[tokio::test]
    async fn test_create_existing_without_force() {
        let (mut d, calls) = dispatcher();
        let result = d
            .create_connections(&NamePatterns::from("HR"), false, &definition("HANA"), false)
            .await;
        assert!(matches!(result, Err(DwcError::AlreadyExists(_))));
        assert!(mutations(&calls).is_empty());
    }

    #[tokio::test]
    async fn test_force_replaces_existing() {
        let (mut d, calls) = dispatcher();
        d.create_connections(&NamePatterns::from("HR"), false, &definition("HANA"), true)
            .await
            .unwrap();
        assert_eq!(
            mutations(&calls),
            vec!["DELETE connection sp-3 c-9", "POST connection sp-3 \"HANA\""]
        );
    }

    #[tokio::test]
    async fn test_force_replace_failure_is_partial() {
        let (mut d, calls) = dispatcher();
        d.api.fail_connection_create = true;

        let result = d
            .create_connections(&NamePatterns::from("HR"), false, &definition("HANA"), true)
            .await;

        assert!(matches!(result, Err(DwcError::PartialFailure(_))));
        assert_eq!(
            mutations(&calls),
            vec!["DELETE connection sp-3 c-9", "POST connection sp-3 \"HANA\""]
        );
    }

    #[tokio::test]
    async fn test_plain_create_failure_is_not_partial() {
        let (mut d, _) = dispatcher();
        d.api.fail_connection_create = true;

        let result = d
            .create_connections(&NamePatterns::from("SALES_EU"), false, &definition("ORACLE"), false)
            .await;

        assert!(matches!(result, Err(DwcError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_create_without_workspaces() {
        let (mut d, _) = dispatcher();
        let result = d
            .create_connections(&NamePatterns::from("GHOST"), false, &definition("X"), false)
            .await;
        assert!(matches!(result, Err(DwcError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_skips_workspaces_without_connection() {
        let (mut d, calls) = dispatcher();
        let deleted = d
            .delete_connections(&NamePatterns::all(), true, "HANA")
            .await
            .unwrap();
        assert_eq!(deleted, vec!["SALES", "HR"]);
        assert_eq!(
            mutations(&calls),
            vec!["DELETE connection sp-1 c-1", "DELETE connection sp-3 c-9"]
        );
    }
}
