//! Workspace data models

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::quota;
use crate::dwc::traits::TenantResource;
use crate::error::{DwcError, Result};

/// Workspace entry from the tenant inventory
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkspaceRecord {
    pub id: String,
    /// Technical name (uppercase, unique within the tenant)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Storage/memory consumption; `None` when the consumption query has no entry
    #[serde(default)]
    pub resources: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TenantResource for WorkspaceRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Entry of a workspace member list
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SpaceMember {
    pub name: String,
    #[serde(rename = "type", default = "default_member_type")]
    pub kind: String,
}

fn default_member_type() -> String {
    "user".to_string()
}

impl SpaceMember {
    pub fn user(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: default_member_type(),
        }
    }
}

/// Body of a workspace definition (`spaceDefinition`)
///
/// Fields the engine edits are typed; everything else round-trips through
/// `extra` untouched.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_storage: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_ram: Option<u64>,
    #[serde(default)]
    pub members: Vec<SpaceMember>,
    #[serde(default)]
    pub dbusers: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpaceDefinition {
    /// Minimal definition used when no template is given
    pub fn with_defaults(label: &str) -> Self {
        let extra = json!({
            "version": "1.0.4",
            "priority": quota::DEFAULT_PRIORITY,
            "auditing": {
                "dppRead": { "retentionPeriod": 7, "isAuditPolicyActive": false },
                "dppChange": { "retentionPeriod": 7, "isAuditPolicyActive": false }
            },
            "allowConsumption": false,
            "enableDataLake": false,
            "hdicontainers": {},
            "workloadClass": {
                "totalStatementMemoryLimit": { "value": null, "unit": "Gigabyte" },
                "totalStatementThreadLimit": { "value": null, "unit": "Counter" }
            },
            "workloadType": "default"
        });

        Self {
            label: Some(Value::String(label.to_string())),
            assigned_storage: Some(quota::DEFAULT_STORAGE),
            assigned_ram: Some(quota::DEFAULT_MEMORY),
            members: Vec::new(),
            dbusers: Map::new(),
            extra: match extra {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    /// Label as text, if it is a string
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_ref().and_then(|l| l.as_str())
    }

    /// Names of the data access users (`dbusers` keys)
    pub fn dbuser_names(&self) -> Vec<String> {
        self.dbusers.keys().cloned().collect()
    }

    /// Whether a user is already a member
    pub fn has_member(&self, user_name: &str) -> bool {
        self.members.iter().any(|m| m.name == user_name)
    }
}

/// A workspace definition paired with the identifier it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceDefinition {
    pub identifier: String,
    pub definition: SpaceDefinition,
}

impl WorkspaceDefinition {
    pub fn new(identifier: &str, definition: SpaceDefinition) -> Self {
        Self {
            identifier: identifier.to_string(),
            definition,
        }
    }

    /// Extract the definition of `identifier` from a `{ID: {spaceDefinition}}` document
    ///
    /// Returns `None` when the document has no entry for the identifier.
    pub fn from_document(identifier: &str, document: &Value) -> Result<Option<Self>> {
        let Some(entry) = document.get(identifier) else {
            return Ok(None);
        };

        let body = entry.get("spaceDefinition").ok_or_else(|| {
            DwcError::InvalidInput(format!(
                "definition of '{}' has no spaceDefinition",
                identifier
            ))
        })?;

        let definition: SpaceDefinition = serde_json::from_value(body.clone())?;
        Ok(Some(Self::new(identifier, definition)))
    }

    /// Render as the `{ID: {spaceDefinition}}` document the tenant expects
    pub fn to_document(&self) -> Result<Value> {
        let mut root = Map::new();
        root.insert(
            self.identifier.clone(),
            json!({ "spaceDefinition": serde_json::to_value(&self.definition)? }),
        );
        Ok(Value::Object(root))
    }
}

/// Workspace with its definition and auxiliary object lists
#[derive(Serialize, Debug, Clone)]
pub struct WorkspaceDetail {
    #[serde(flatten)]
    pub record: WorkspaceRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<SpaceDefinition>,
    pub dbuser_objects: Vec<Value>,
    pub data_builder: Vec<Value>,
    pub remote_tables: Vec<Value>,
    pub business_builder: Vec<Value>,
}

impl WorkspaceDetail {
    pub fn new(record: WorkspaceRecord) -> Self {
        Self {
            record,
            definition: None,
            dbuser_objects: Vec::new(),
            data_builder: Vec::new(),
            remote_tables: Vec::new(),
            business_builder: Vec::new(),
        }
    }
}

/// Member entry tagged with the workspace it belongs to
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub space_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_record_keeps_unknown_fields() {
        let record: WorkspaceRecord = serde_json::from_value(json!({
            "id": "sp-1",
            "name": "SALES",
            "businessName": "Sales"
        }))
        .unwrap();
        assert_eq!(record.name(), "SALES");
        assert!(record.resources.is_none());
        assert_eq!(record.extra["businessName"], "Sales");
    }

    #[test]
    fn test_default_definition() {
        let def = SpaceDefinition::with_defaults("My Space");
        assert_eq!(def.label_text(), Some("My Space"));
        assert_eq!(def.assigned_storage, Some(1_000_000_000));
        assert_eq!(def.assigned_ram, Some(500_000_000));
        assert_eq!(def.extra["version"], "1.0.4");
        assert_eq!(def.extra["priority"], 5);
        assert_eq!(def.extra["enableDataLake"], false);
        assert!(def.members.is_empty());
    }

    #[test]
    fn test_document_round_trip_keeps_explicit_identifier() {
        let mut def = SpaceDefinition::with_defaults("x");
        def.members.push(SpaceMember::user("ALICE"));
        let original = WorkspaceDefinition::new("SALES", def);

        let doc = original.to_document().unwrap();
        assert_eq!(doc["SALES"]["spaceDefinition"]["assignedRam"], 500_000_000);
        assert_eq!(doc["SALES"]["spaceDefinition"]["members"][0]["type"], "user");

        let parsed = WorkspaceDefinition::from_document("SALES", &doc)
            .unwrap()
            .unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_from_document_absent_identifier() {
        let doc = json!({"OTHER": {"spaceDefinition": {}}});
        assert!(WorkspaceDefinition::from_document("SALES", &doc)
            .unwrap()
            .is_none());
        assert!(WorkspaceDefinition::from_document("SALES", &json!({}))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_from_document_without_definition_is_invalid() {
        let doc = json!({"SALES": {"other": 1}});
        assert!(matches!(
            WorkspaceDefinition::from_document("SALES", &doc),
            Err(DwcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dbuser_names_and_membership() {
        let def: SpaceDefinition = serde_json::from_value(json!({
            "members": [{"name": "BOB", "type": "user"}],
            "dbusers": {"SALES#READER": {}, "SALES#ETL": {}}
        }))
        .unwrap();
        assert!(def.has_member("BOB"));
        assert!(!def.has_member("ALICE"));
        let mut names = def.dbuser_names();
        names.sort();
        assert_eq!(names, vec!["SALES#ETL", "SALES#READER"]);
    }
}
