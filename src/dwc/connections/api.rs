//! Connection API operations

use log::debug;
use serde_json::Value;

use crate::dwc::envelope::parse_list;
use crate::dwc::SessionContext;
use crate::error::Result;

use super::models::ConnectionRecord;

impl SessionContext {
    /// Get the connections of a workspace (by workspace id)
    pub async fn list_connections(&self, space_id: &str) -> Result<Vec<ConnectionRecord>> {
        let body = self
            .get_json("connections", &[("space_id", space_id)])
            .await?;
        let mut connections: Vec<ConnectionRecord> = parse_list(body)?.into_records()?;
        for connection in &mut connections {
            connection.space_id = Some(space_id.to_string());
        }
        debug!(
            "Fetched {} connections for workspace {}",
            connections.len(),
            space_id
        );
        Ok(connections)
    }

    /// Create a connection in a workspace
    pub async fn post_connection(&self, space_id: &str, definition: &Value) -> Result<()> {
        self.post_json("connection", &[("space_id", space_id)], definition)
            .await?;
        Ok(())
    }

    /// Delete a connection from a workspace
    pub async fn remove_connection(&self, space_id: &str, connection_id: &str) -> Result<()> {
        self.delete(
            "connection_delete",
            &[("connection_id", connection_id), ("space_id", space_id)],
        )
        .await
    }
}
