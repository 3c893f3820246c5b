//! Persisted tenant settings
//!
//! Tenant URL, login user, obfuscated password and the path of the external
//! command-line utility, kept in a JSON file under the home directory.

mod commands;
mod models;
mod obfuscate;
mod store;

pub use commands::run_config_command;
pub use models::{Credentials, TenantConfig};
pub use obfuscate::{obfuscate, reveal};
pub use store::SettingsStore;
