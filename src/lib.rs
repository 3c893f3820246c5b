//! dwcctl - Provision a Data Warehouse Cloud tenant from the command line
//!
//! Logs in once through the tenant's browser login flow and then creates,
//! deletes and lists workspaces, workspace members, connections and object
//! shares.
//!
//! # Features
//!
//! - Single login per process, reused by every command
//! - Exact or substring (wildcard) name matching
//! - Bulk workspace create/delete from CSV files
//! - Script files run many commands against one session
//! - Multiple output formats (table, CSV, JSON, YAML)
//!
//! # Example
//!
//! ```bash
//! # Store tenant settings (prompts for the password)
//! dwcctl config --url https://acme.eu10.hcs.cloud.sap --user ADMIN --password
//!
//! # List workspaces whose name contains SALES
//! dwcctl spaces list -w SALES
//!
//! # Create a workspace from a template with two members
//! dwcctl spaces create SALES_EU -t SALES -u JDOE ASMITH
//!
//! # Run a script of commands
//! dwcctl script provision.txt
//! ```

pub mod cli;
pub mod config;
pub mod dwc;
pub mod error;
pub mod output;
pub mod script;
pub mod settings;
pub mod ui;

pub use cli::{Cli, Command, OutputFormat};
pub use dwc::{
    Dispatcher, ExternalCommandAdapter, NamePatterns, ProcessAdapter, ResourceCache,
    SamlAuthClient, SessionContext, TenantApi,
};
pub use error::{DwcError, Result};
pub use script::{execute, read_script, run_script};
pub use settings::{run_config_command, SettingsStore, TenantConfig};
