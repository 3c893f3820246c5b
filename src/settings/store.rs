//! Settings file I/O

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::settings as settings_config;
use crate::error::DwcError;

use super::models::TenantConfig;

/// Reads and writes the settings file
pub struct SettingsStore {
    config_path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Store at the default path (~/.dwcctl/config.json)
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Store at an explicit path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Store for a `--config` value (the flag also reads `DWCCTL_CONFIG`)
    pub fn resolve(path: Option<&Path>) -> Self {
        match path {
            Some(path) => {
                debug!("Using settings file {}", path.display());
                Self::with_path(path.to_path_buf())
            }
            None => Self::new(),
        }
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(settings_config::DIR_NAME)
            .join(settings_config::FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Directory receiving workspace definition files for the external utility
    pub fn work_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(settings_config::WORK_DIR)
    }

    /// Load the settings; a missing file yields empty settings
    pub fn load(&self) -> Result<TenantConfig, DwcError> {
        if !self.config_path.exists() {
            return Ok(TenantConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            DwcError::Config(format!(
                "Failed to read settings {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DwcError::Config(format!(
                "Failed to parse settings {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Load the settings, failing when the file does not exist
    pub fn load_existing(&self) -> Result<TenantConfig, DwcError> {
        if !self.config_path.exists() {
            return Err(DwcError::Config(format!(
                "Settings file {} not found - run 'dwcctl config' first",
                self.config_path.display()
            )));
        }
        self.load()
    }

    /// Save atomically (tmp file + rename), creating the directory if needed
    pub fn save(&self, config: &TenantConfig) -> Result<(), DwcError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DwcError::Config(format!(
                    "Failed to create settings directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| DwcError::Config(format!("Failed to serialize settings: {}", e)))?;

        let tmp_path = self.config_path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| {
            DwcError::Config(format!(
                "Failed to write temp settings file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        // the file holds the (obfuscated) password
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                DwcError::Config(format!("Failed to set permissions on settings file: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.config_path).map_err(|e| {
            DwcError::Config(format!(
                "Failed to rename temp settings file to {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        debug!("Saved settings to {}", self.config_path.display());
        Ok(())
    }
}
