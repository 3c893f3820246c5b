//! CLI argument parsing

mod common;
mod connections;
mod settings;
mod shares;
mod spaces;
mod users;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{defaults, settings as settings_config};

pub use common::{OutputFormat, PatternArgs};
pub use connections::{
    ConnectionCreateArgs, ConnectionDeleteArgs, ConnectionListArgs, ConnectionsAction,
};
pub use settings::ConfigArgs;
pub use shares::{ShareCreateArgs, SharesAction};
pub use spaces::{
    BulkAction, BulkCreateArgs, BulkDeleteArgs, MemberAction, MemberChangeArgs, SpaceCreateArgs,
    SpaceDeleteArgs, SpacesAction,
};
pub use users::{UserListArgs, UsersAction};

/// Provision workspaces, members, connections and shares in a Data Warehouse Cloud tenant
#[derive(Parser, Debug)]
#[command(name = "dwcctl")]
#[command(version)]
#[command(about = "Provision workspaces, members, connections and shares in a Data Warehouse Cloud tenant", long_about = None)]
pub struct Cli {
    /// Settings file
    #[arg(long, global = true, env = settings_config::ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Omit the header row in table and CSV output
    #[arg(long, global = true)]
    pub no_header: bool,

    /// No spinners (for scripts and pipes)
    #[arg(short, long, global = true)]
    pub batch: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change the tenant settings
    Config(ConfigArgs),

    /// Workspaces
    Spaces {
        #[command(subcommand)]
        action: SpacesAction,
    },

    /// Tenant users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Workspace connections
    Connections {
        #[command(subcommand)]
        action: ConnectionsAction,
    },

    /// Object shares between workspaces
    Shares {
        #[command(subcommand)]
        action: SharesAction,
    },

    /// Run the commands in a file, one per line, after a single login
    Script(ScriptArgs),
}

/// Arguments for 'script'
#[derive(Parser, Debug)]
pub struct ScriptArgs {
    /// Script file
    pub file: PathBuf,
}
