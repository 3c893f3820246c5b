//! Authenticated tenant session
//!
//! `SessionContext` is built once per process after the settings are loaded,
//! logs in once and is then passed to every operation. It owns the cookie
//! carrying transport, the URL template registry and the cached identity of
//! the logged-in user.

use async_trait::async_trait;
use log::{debug, error, warn};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::dwc::auth::{html, AuthClient};
use crate::dwc::connections::ConnectionRecord;
use crate::dwc::envelope::check_service_error;
use crate::dwc::shares::{SharePayload, ShareTarget};
use crate::dwc::spaces::{WorkspaceDefinition, WorkspaceRecord};
use crate::dwc::templates::UrlRegistry;
use crate::dwc::traits::TenantApi;
use crate::dwc::transport::Transport;
use crate::dwc::users::{UserInfo, UserRecord};
use crate::error::{DwcError, Result};

/// Session state for one tenant
pub struct SessionContext {
    registry: UrlRegistry,
    user: String,
    password: String,
    transport: Option<Transport>,
    passcode_url: Option<String>,
    user_info: Option<UserInfo>,
}

impl SessionContext {
    /// Create an unauthenticated session
    pub fn new(base_url: &str, user: &str, password: &str) -> Self {
        Self {
            registry: UrlRegistry::new(base_url),
            user: user.to_string(),
            password: password.to_string(),
            transport: None,
            passcode_url: None,
            user_info: None,
        }
    }

    /// Run the login handshake and fetch the caller's identity
    ///
    /// Returns false on any failure; nothing from a failed attempt is kept.
    pub async fn login(&mut self, auth: &dyn AuthClient) -> bool {
        self.reset();
        let session = match auth
            .login(self.registry.base_url(), &self.user, &self.password)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                error!("Authentication failed for {}: {}", self.user, e);
                return false;
            }
        };

        self.transport = Some(session.transport);
        self.passcode_url = Some(session.passcode_url);

        match self.identity().await {
            Ok(info) => {
                debug!(
                    "Logged in as {} ({:?})",
                    self.user,
                    info.user_name().unwrap_or("unknown")
                );
                true
            }
            Err(e) => {
                error!("Authentication failed: identity query failed: {}", e);
                self.reset();
                false
            }
        }
    }

    /// Drop cookies, passcode page and identity
    fn reset(&mut self) {
        self.transport = None;
        self.passcode_url = None;
        self.user_info = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.transport.is_some() && self.user_info.is_some()
    }

    pub fn registry(&self) -> &UrlRegistry {
        &self.registry
    }

    /// Register a dynamically built query template
    pub fn register_template(&mut self, name: &str, template: &str) {
        self.registry.register(name, template);
    }

    /// Latency of the most recent call
    pub fn last_elapsed(&self) -> Option<Duration> {
        self.transport.as_ref().map(|t| t.last_elapsed())
    }

    fn transport(&self) -> Result<&Transport> {
        self.transport
            .as_ref()
            .ok_or_else(|| DwcError::Authentication("session is not logged in".to_string()))
    }

    /// Identity record, fetched on first use and cached for the session
    pub(crate) async fn identity(&mut self) -> Result<UserInfo> {
        if let Some(info) = &self.user_info {
            return Ok(info.clone());
        }
        let raw = self.get_json("logon", &[]).await?;
        let info: UserInfo = serde_json::from_value(raw)?;
        self.user_info = Some(info.clone());
        Ok(info)
    }

    /// GET a registered template and parse the JSON body
    pub(crate) async fn get_json(&self, name: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.registry.resolve(name, params)?;
        let response = self.transport()?.get(&url).await?;
        let body = response.json()?;
        if let Err(e) = check_service_error(&body) {
            warn!("{}: {}", name, e);
            return Err(e);
        }
        Ok(body)
    }

    /// POST a JSON body to a registered template and parse the answer
    pub(crate) async fn post_json(
        &self,
        name: &str,
        params: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value> {
        let url = self.registry.resolve(name, params)?;
        let response = self.transport()?.post_json(&url, body).await?;
        let answer = response.json().unwrap_or(Value::Null);
        if let Err(e) = check_service_error(&answer) {
            warn!("{}: {}", name, e);
            return Err(e);
        }
        Ok(answer)
    }

    /// DELETE a registered template
    pub(crate) async fn delete(&self, name: &str, params: &[(&str, &str)]) -> Result<()> {
        let url = self.registry.resolve(name, params)?;
        self.transport()?.delete(&url).await?;
        Ok(())
    }

    /// Scrape a one-time passcode from the passcode page
    pub(crate) async fn get_passcode(&self) -> Result<String> {
        let url = self
            .passcode_url
            .as_deref()
            .ok_or_else(|| DwcError::Authentication("no passcode page known".to_string()))?;
        let response = self.transport()?.get(url).await?;
        html::heading_text(&response.body)
            .ok_or_else(|| DwcError::Authentication("passcode page has no <h2>".to_string()))
    }
}

#[async_trait]
impl TenantApi for SessionContext {
    fn base_url(&self) -> &str {
        self.registry.base_url()
    }

    async fn user_info(&mut self) -> Result<UserInfo> {
        self.identity().await
    }

    async fn fetch_workspaces(&self) -> Result<Vec<WorkspaceRecord>> {
        self.list_workspaces().await
    }

    async fn fetch_workspace_consumption(&self) -> Result<HashMap<String, Value>> {
        self.list_workspace_consumption().await
    }

    async fn fetch_workspace_definition(
        &self,
        name: &str,
    ) -> Result<Option<WorkspaceDefinition>> {
        self.get_workspace_definition(name).await
    }

    async fn fetch_users(&mut self) -> Result<Vec<UserRecord>> {
        self.list_users().await
    }

    async fn fetch_connections(&self, space_id: &str) -> Result<Vec<ConnectionRecord>> {
        self.list_connections(space_id).await
    }

    async fn create_connection(&self, space_id: &str, definition: &Value) -> Result<()> {
        self.post_connection(space_id, definition).await
    }

    async fn delete_connection(&self, space_id: &str, connection_id: &str) -> Result<()> {
        self.remove_connection(space_id, connection_id).await
    }

    async fn fetch_shares(
        &self,
        space_name: &str,
        object_names: &[String],
    ) -> Result<BTreeMap<String, Vec<ShareTarget>>> {
        self.list_shares(space_name, object_names).await
    }

    async fn create_share(&self, payload: &SharePayload) -> Result<()> {
        self.post_share(payload).await
    }

    async fn fetch_builder_objects(
        &mut self,
        space_name: Option<&str>,
        shared_only: bool,
    ) -> Result<Vec<Value>> {
        self.list_builder_objects(space_name, shared_only).await
    }

    async fn fetch_remote_tables(&self, space_name: &str) -> Result<Vec<Value>> {
        self.list_remote_tables(space_name).await
    }

    async fn fetch_business_builder_objects(&self, space_name: &str) -> Result<Vec<Value>> {
        self.list_business_builder_objects(space_name).await
    }

    async fn fetch_schema_objects(
        &mut self,
        space_name: &str,
        dbusers: &[String],
    ) -> Result<Vec<Value>> {
        self.list_schema_objects(space_name, dbusers).await
    }

    async fn passcode(&self) -> Result<String> {
        self.get_passcode().await
    }
}

#[cfg(test)]
impl SessionContext {
    /// Logged-in session against a mock server (tenant id `T1`)
    pub fn test_session(base_url: &str) -> Self {
        let mut session = Self::new(base_url, "tester", "secret");
        session.transport = Some(Transport::new().unwrap());
        session.passcode_url = Some(format!("{}/passcode", base_url));
        session.user_info = Some(
            serde_json::from_value(serde_json::json!({
                "user": {"userName": "TESTER"},
                "session": {"tenant": [{"id": "T1"}]}
            }))
            .unwrap(),
        );
        session
    }
}
