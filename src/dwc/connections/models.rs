//! Connection data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::dwc::traits::TenantResource;
use crate::error::{DwcError, Result};

/// Connection defined in a workspace
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ConnectionRecord {
    pub id: String,
    pub name: String,
    /// Owning workspace id (filled in after the query)
    #[serde(rename = "spaceId", default)]
    pub space_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TenantResource for ConnectionRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Connection definition as posted to the tenant (`{data: {name, ...}}`)
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionDefinition {
    name: String,
    body: Value,
}

impl ConnectionDefinition {
    /// Validate a definition document
    pub fn from_value(body: Value) -> Result<Self> {
        let name = body
            .get("data")
            .and_then(|d| d.get("name"))
            .and_then(|n| n.as_str())
            .ok_or_else(|| {
                DwcError::InvalidInput("connection definition has no data.name".to_string())
            })?
            .to_string();
        Ok(Self { name, body })
    }

    /// Load and validate a definition file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DwcError::InvalidInput(format!(
                "cannot read connection file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_value(serde_json::from_str(&content)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}
