//! User data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::dwc::traits::TenantResource;
use crate::error::{DwcError, Result};

/// User entry from the tenant user inventory
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UserRecord {
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Key/value attributes (`EMAIL`, `DISPLAY_NAME`, ...)
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    /// Semicolon separated role names
    #[serde(default)]
    pub roles: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TenantResource for UserRecord {
    fn id(&self) -> &str {
        &self.user_name
    }

    fn name(&self) -> &str {
        &self.user_name
    }
}

impl UserRecord {
    fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(|v| v.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.parameter("EMAIL")
    }

    pub fn display_name(&self) -> Option<&str> {
        self.parameter("DISPLAY_NAME")
    }

    /// Role string expanded into one entry per role
    pub fn roles_list(&self) -> Vec<RoleAssignment> {
        self.roles
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(|roles| {
                roles
                    .split(';')
                    .map(|role| RoleAssignment {
                        user_name: self.user_name.clone(),
                        role_name: role.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One (user, role) pair
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub user_name: String,
    pub role_name: String,
}

/// Flattened user entry for reports
#[derive(Serialize, Debug, Clone)]
pub struct UserReport {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub number_of_days_visited: Option<Value>,
    pub roles: String,
    pub roles_list: Vec<RoleAssignment>,
}

impl From<&UserRecord> for UserReport {
    fn from(user: &UserRecord) -> Self {
        Self {
            user_name: user.user_name.clone(),
            email: user.email().map(String::from),
            display_name: user.display_name().map(String::from),
            number_of_days_visited: user.parameters.get("NUMBER_OF_DAYS_VISITED").cloned(),
            roles: user.roles.clone().unwrap_or_default(),
            roles_list: user.roles_list(),
        }
    }
}

/// Identity record of the logged-in user
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UserInfo {
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub session: Value,
}

impl UserInfo {
    pub fn user_name(&self) -> Option<&str> {
        self.user.get("userName").and_then(|v| v.as_str())
    }

    /// Tenant id, needed by the user inventory query
    pub fn tenant_id(&self) -> Result<String> {
        self.session
            .get("tenant")
            .and_then(|t| t.get(0))
            .and_then(|t| t.get("id"))
            .and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| DwcError::Json("identity record has no tenant id".to_string()))
    }
}
