//! Persisted tenant settings

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::error::{DwcError, Result};

use super::obfuscate::reveal;

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Tenant URL (`https://<tenant>.<region>.hcs.cloud.sap`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Login user (usually an email address)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Obfuscated password, see `obfuscate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Path of the external command-line utility
    #[serde(rename = "cli", skip_serializing_if = "Option::is_none")]
    pub cli_path: Option<String>,
}

/// Everything needed to log in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub user: String,
    pub password: String,
}

impl TenantConfig {
    /// Tenant URL, user and decoded password
    pub fn credentials(&self) -> Result<Credentials> {
        let missing = |field: &str| {
            DwcError::Config(format!(
                "Missing '{}' setting - run 'dwcctl config --{}'",
                field, field
            ))
        };

        let url = self.url.as_deref().filter(|u| !u.is_empty()).ok_or_else(|| missing("url"))?;
        let user = self.user.as_deref().filter(|u| !u.is_empty()).ok_or_else(|| missing("user"))?;
        let password = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| missing("password"))?;

        Ok(Credentials {
            url: url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: reveal(password)?,
        })
    }

    /// External utility, defaulting to `dwc` on the PATH
    pub fn cli_path(&self) -> &str {
        self.cli_path.as_deref().unwrap_or(defaults::CLI_BINARY)
    }
}
