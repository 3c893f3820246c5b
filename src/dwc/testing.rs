//! In-memory tenant and command adapter for engine tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::dwc::connections::ConnectionRecord;
use crate::dwc::external::{CommandOutput, ExternalCommandAdapter};
use crate::dwc::shares::{SharePayload, ShareTarget};
use crate::dwc::spaces::{SpaceDefinition, WorkspaceDefinition, WorkspaceRecord};
use crate::dwc::traits::TenantApi;
use crate::dwc::users::{UserInfo, UserRecord};
use crate::error::{DwcError, Result};

/// Ordered log of remote calls shared by the fake tenant and adapter
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn workspace(id: &str, name: &str) -> WorkspaceRecord {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

pub fn user(name: &str, email: &str) -> UserRecord {
    serde_json::from_value(json!({
        "userName": name,
        "parameters": {"EMAIL": email, "DISPLAY_NAME": name},
        "roles": "DW_Viewer"
    }))
    .unwrap()
}

pub fn connection(id: &str, name: &str) -> ConnectionRecord {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

/// Tenant whose inventories live in memory
#[derive(Default)]
pub struct FakeTenant {
    pub workspaces: Mutex<Vec<WorkspaceRecord>>,
    /// `None` makes the consumption query fail
    pub consumption: Option<HashMap<String, Value>>,
    pub definitions: HashMap<String, SpaceDefinition>,
    pub users: Vec<UserRecord>,
    pub connections: HashMap<String, Vec<ConnectionRecord>>,
    pub builder_objects: Vec<Value>,
    pub shares: BTreeMap<String, Vec<ShareTarget>>,
    /// Make every connection create fail after it is recorded
    pub fail_connection_create: bool,
    pub calls: CallLog,
}

impl FakeTenant {
    pub fn new(calls: CallLog) -> Self {
        Self {
            consumption: Some(HashMap::new()),
            calls,
            ..Default::default()
        }
    }

    pub fn with_workspaces(mut self, records: Vec<WorkspaceRecord>) -> Self {
        self.workspaces = Mutex::new(records);
        self
    }

    pub fn with_definition(mut self, name: &str, definition: SpaceDefinition) -> Self {
        self.definitions.insert(name.to_string(), definition);
        self
    }

    pub fn with_users(mut self, users: Vec<UserRecord>) -> Self {
        self.users = users;
        self
    }

    /// Replace the upstream workspace inventory
    pub fn set_workspaces(&self, records: Vec<WorkspaceRecord>) {
        *self.workspaces.lock().unwrap() = records;
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TenantApi for FakeTenant {
    fn base_url(&self) -> &str {
        "https://tenant.test"
    }

    async fn user_info(&mut self) -> Result<UserInfo> {
        Ok(serde_json::from_value(json!({
            "user": {"userName": "ADMIN"},
            "session": {"tenant": [{"id": "T1"}]}
        }))?)
    }

    async fn fetch_workspaces(&self) -> Result<Vec<WorkspaceRecord>> {
        self.record("GET spaces".to_string());
        Ok(self.workspaces.lock().unwrap().clone())
    }

    async fn fetch_workspace_consumption(&self) -> Result<HashMap<String, Value>> {
        self.record("GET spaces_resources".to_string());
        self.consumption.clone().ok_or(DwcError::Api {
            status: 500,
            message: "consumption unavailable".to_string(),
        })
    }

    async fn fetch_workspace_definition(
        &self,
        name: &str,
    ) -> Result<Option<WorkspaceDefinition>> {
        self.record(format!("GET space {}", name));
        Ok(self
            .definitions
            .get(name)
            .map(|def| WorkspaceDefinition::new(name, def.clone())))
    }

    async fn fetch_users(&mut self) -> Result<Vec<UserRecord>> {
        self.record("GET users".to_string());
        Ok(self.users.clone())
    }

    async fn fetch_connections(&self, space_id: &str) -> Result<Vec<ConnectionRecord>> {
        self.record(format!("GET connections {}", space_id));
        Ok(self.connections.get(space_id).cloned().unwrap_or_default())
    }

    async fn create_connection(&self, space_id: &str, definition: &Value) -> Result<()> {
        self.record(format!(
            "POST connection {} {}",
            space_id, definition["data"]["name"]
        ));
        if self.fail_connection_create {
            return Err(DwcError::Api {
                status: 500,
                message: "connection rejected".to_string(),
            });
        }
        Ok(())
    }

    async fn delete_connection(&self, space_id: &str, connection_id: &str) -> Result<()> {
        self.record(format!("DELETE connection {} {}", space_id, connection_id));
        Ok(())
    }

    async fn fetch_shares(
        &self,
        space_name: &str,
        object_names: &[String],
    ) -> Result<BTreeMap<String, Vec<ShareTarget>>> {
        self.record(format!("GET shares {} {}", space_name, object_names.join(",")));
        Ok(self.shares.clone())
    }

    async fn create_share(&self, payload: &SharePayload) -> Result<()> {
        self.record(format!(
            "POST share {} {} -> {}",
            payload.space_name,
            payload.object_names.join(","),
            payload.share_space_names.join(",")
        ));
        Ok(())
    }

    async fn fetch_builder_objects(
        &mut self,
        space_name: Option<&str>,
        shared_only: bool,
    ) -> Result<Vec<Value>> {
        self.record(format!(
            "GET builder_objects {} {}",
            space_name.unwrap_or("*"),
            shared_only
        ));
        Ok(self.builder_objects.clone())
    }

    async fn fetch_remote_tables(&self, space_name: &str) -> Result<Vec<Value>> {
        self.record(format!("GET remotetables {}", space_name));
        Ok(vec![json!({"name": "RT1"})])
    }

    async fn fetch_business_builder_objects(&self, space_name: &str) -> Result<Vec<Value>> {
        self.record(format!("POST businessbuilder {}", space_name));
        Err(DwcError::Api {
            status: 500,
            message: "business builder unavailable".to_string(),
        })
    }

    async fn fetch_schema_objects(
        &mut self,
        space_name: &str,
        dbusers: &[String],
    ) -> Result<Vec<Value>> {
        self.record(format!("GET dbuser_objects {} {}", space_name, dbusers.join(",")));
        Ok(dbusers
            .iter()
            .map(|u| json!({"id": format!("{}.TABLE", u)}))
            .collect())
    }

    async fn passcode(&self) -> Result<String> {
        Ok("PASS".to_string())
    }
}

/// Adapter that records its arguments instead of spawning a process
pub struct RecordingAdapter {
    pub calls: CallLog,
    /// Fail any invocation whose second argument equals this subcommand
    pub fail_on: Option<&'static str>,
}

impl RecordingAdapter {
    pub fn new(calls: CallLog) -> Self {
        Self {
            calls,
            fail_on: None,
        }
    }

    pub fn failing_on(calls: CallLog, subcommand: &'static str) -> Self {
        Self {
            calls,
            fail_on: Some(subcommand),
        }
    }
}

#[async_trait]
impl ExternalCommandAdapter for RecordingAdapter {
    async fn run(&self, args: &[String]) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(format!("CLI {}", args[..2].join(" ")));
        if self.fail_on.is_some_and(|sub| args.get(1).map(String::as_str) == Some(sub)) {
            return Err(DwcError::Command {
                exit_code: 1,
                output: "simulated failure".to_string(),
            });
        }
        Ok(CommandOutput {
            exit_code: 0,
            output: String::new(),
        })
    }
}
