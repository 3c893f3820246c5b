//! Share API operations

use serde_json::Value;
use std::collections::BTreeMap;

use crate::dwc::SessionContext;
use crate::error::{DwcError, Result};

use super::models::{SharePayload, ShareTarget};

impl SessionContext {
    /// Get the share targets of the given objects in a workspace
    pub async fn list_shares(
        &self,
        space_name: &str,
        object_names: &[String],
    ) -> Result<BTreeMap<String, Vec<ShareTarget>>> {
        let objects = object_names.join(",");
        let body = self
            .get_json(
                "share_list",
                &[("space_name", space_name), ("object_names", &objects)],
            )
            .await?;

        match body {
            Value::Null => Ok(BTreeMap::new()),
            Value::Object(_) => Ok(serde_json::from_value(body)?),
            other => Err(DwcError::Json(format!(
                "Unexpected share list payload: {}",
                other
            ))),
        }
    }

    /// Share an object with other workspaces
    pub async fn post_share(&self, payload: &SharePayload) -> Result<()> {
        self.post_json("shares", &[], &serde_json::to_value(payload)?)
            .await?;
        Ok(())
    }
}
