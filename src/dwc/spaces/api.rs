//! Workspace API operations

use log::debug;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::config::api;
use crate::dwc::envelope::{list_field, parse_list};
use crate::dwc::SessionContext;
use crate::error::{DwcError, Result};

use super::models::{WorkspaceDefinition, WorkspaceRecord};

/// Object types listed by the data builder search
const BUILDER_OBJECT_TYPES: &[&str] = &[
    r#"technical_type:EQ:"DWC_REMOTE_TABLE""#,
    r#"technical_type:EQ:"DWC_LOCAL_TABLE""#,
    r#"technical_type:EQ:"DWC_VIEW""#,
    r#"technical_type:EQ:"DWC_ERMODEL""#,
    r#"technical_type:EQ:"DWC_DATAFLOW""#,
    r#"technical_type:EQ:"DWC_IDT""#,
    r#"kind:EQ:"sap.dis.dataflow""#,
    r#"kind:EQ:"sap.dwc.dac""#,
    r#"kind:EQ:"sap.dwc.taskChain""#,
];

/// Build the `Search.search` query for data builder objects
pub fn builder_objects_query(space_name: Option<&str>, shared_only: bool) -> String {
    let mut filter = format!("({})", BUILDER_OBJECT_TYPES.join(" OR "));
    if shared_only {
        filter.push_str(r#" AND shared_with_space_name:NE(S):"NULL""#);
    }
    if let Some(name) = space_name {
        filter.push_str(&format!(r#" AND space_name:EQ:"{}""#, name));
    }
    format!("query='SCOPE:SEARCH_DESIGN ({}) *'", filter)
}

/// Payload of the business builder content query
fn business_builder_query(space_name: &str) -> Value {
    json!({
        "SpaceID": space_name,
        "Sort": { "Column": "Title", "isDescending": false },
        "HideEmptyPackages": false,
        "PackageSelectionAllowed": true,
        "currentPackage": -1,
        "filterData": [],
        "searchData": [],
        "typeOrder": [
            { "EntityType": "CubeSource", "index": 0 },
            { "EntityType": "ResponsibilityScenario", "index": 1 },
            { "EntityType": "Business Semantic", "index": 2 },
            { "EntityType": "MasterDataSource", "index": 3 },
            { "EntityType": "KPI Model", "index": 4 },
            { "EntityType": "Package", "index": 5 },
            { "EntityType": "Perspective", "index": 6 }
        ]
    })
}

impl SessionContext {
    /// Get the workspace inventory
    pub async fn list_workspaces(&self) -> Result<Vec<WorkspaceRecord>> {
        let body = self.get_json("spaces", &[]).await?;
        let records: Vec<WorkspaceRecord> = parse_list(body)?.into_records()?;
        debug!("Fetched {} workspaces", records.len());
        Ok(records)
    }

    /// Get storage/memory consumption keyed by workspace name
    pub async fn list_workspace_consumption(&self) -> Result<HashMap<String, Value>> {
        let body = self.get_json("spaces_resources", &[]).await?;
        match body {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| {
                    let name = item
                        .get("name")
                        .or_else(|| item.get("spaceName"))
                        .and_then(|n| n.as_str())?
                        .to_string();
                    Some((name, item))
                })
                .collect()),
            Value::Null => Ok(HashMap::new()),
            other => Err(DwcError::Json(format!(
                "Unexpected consumption payload: {}",
                other
            ))),
        }
    }

    /// Get the full definition of a workspace
    ///
    /// A service error (unknown workspace) yields `None`; transport failures
    /// are returned as errors.
    pub async fn get_workspace_definition(
        &self,
        name: &str,
    ) -> Result<Option<WorkspaceDefinition>> {
        let identifier = name.to_uppercase();
        match self
            .get_json("space", &[("space_name", &identifier)])
            .await
        {
            Ok(doc) => WorkspaceDefinition::from_document(&identifier, &doc),
            Err(DwcError::Service { code, message }) => {
                debug!("No definition for '{}': {} {}", identifier, code, message);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Search data builder objects
    pub async fn list_builder_objects(
        &mut self,
        space_name: Option<&str>,
        shared_only: bool,
    ) -> Result<Vec<Value>> {
        if !self.registry().contains("builder_objects") {
            self.register_template(
                "builder_objects",
                &format!(
                    "{}?%24top={}&%24skip=0&%24apply=filter(Search.search({{search}}))&%24count=true",
                    api::SEARCH,
                    api::SEARCH_TOP
                ),
            );
        }

        let search = builder_objects_query(space_name, shared_only);
        let body = self
            .get_json("builder_objects", &[("search", &search)])
            .await?;
        let page = parse_list(body)?;
        debug!(
            "Data builder search returned {} objects (total {:?})",
            page.items.len(),
            page.total
        );
        Ok(page.items)
    }

    /// Get the remote tables of a workspace
    pub async fn list_remote_tables(&self, space_name: &str) -> Result<Vec<Value>> {
        let body = self
            .get_json("remotetables", &[("space_name", space_name)])
            .await?;
        list_field(&body, "tables")
    }

    /// Get the business builder objects of a workspace
    pub async fn list_business_builder_objects(&self, space_name: &str) -> Result<Vec<Value>> {
        let body = self
            .post_json("businessbuilder", &[], &business_builder_query(space_name))
            .await?;
        list_field(&body, "Content")
    }

    /// Get schema objects visible to the data access users of a workspace
    pub async fn list_schema_objects(
        &mut self,
        space_name: &str,
        dbusers: &[String],
    ) -> Result<Vec<Value>> {
        if dbusers.is_empty() {
            return Ok(Vec::new());
        }

        if !self.registry().contains("dbuser_objects") {
            self.register_template(
                "dbuser_objects",
                &format!("{}?path={{path}}&space={{space_name}}", api::DATASOURCE_CHILDREN),
            );
        }

        let search_path: Vec<Value> = dbusers
            .iter()
            .map(|id| json!({ "id": id, "type": "schema" }))
            .collect();
        let search_path = serde_json::to_string(&search_path)?;

        let body = self
            .get_json(
                "dbuser_objects",
                &[("path", &search_path), ("space_name", space_name)],
            )
            .await?;
        list_field(&body, "items")
    }
}
