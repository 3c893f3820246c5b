//! Workspace command arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::defaults;

use super::common::PatternArgs;

/// Subcommands of 'spaces'
#[derive(Subcommand, Debug)]
pub enum SpacesAction {
    /// List workspaces with their definition and object lists
    List(PatternArgs),

    /// Create a workspace, from defaults or by copying a template workspace
    ///
    /// The name is upper-cased, spaces become underscores and other invalid
    /// characters are dropped. An existing workspace is only replaced with
    /// --force; replacing deletes the workspace first, so a failed create
    /// leaves it deleted.
    #[command(verbatim_doc_comment)]
    Create(SpaceCreateArgs),

    /// Delete workspaces by name
    Delete(SpaceDeleteArgs),

    /// Workspace members
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Create or delete workspaces listed in a CSV file
    Bulk {
        #[command(subcommand)]
        action: BulkAction,
    },
}

/// Arguments for 'spaces create'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        dwcctl spaces create sales --label \"Sales EMEA\" --disk 2 --memory 1\n  \
        dwcctl spaces create sales_copy --template SALES --users jane bob -w\n  \
        dwcctl spaces create sales --force")]
pub struct SpaceCreateArgs {
    /// Workspace name
    pub name: String,

    /// Workspace label (defaults to the name, cut to 30 characters)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Existing workspace whose definition is copied
    #[arg(short, long)]
    pub template: Option<String>,

    /// Storage quota in GB
    #[arg(short, long)]
    pub disk: Option<f64>,

    /// Memory quota in GB
    #[arg(short, long)]
    pub memory: Option<f64>,

    /// Users to add as members
    #[arg(short, long, num_args = 1..)]
    pub users: Vec<String>,

    /// Match users by containment
    #[arg(short, long)]
    pub wildcard: bool,

    /// Replace an existing workspace
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for 'spaces delete'
#[derive(Parser, Debug)]
pub struct SpaceDeleteArgs {
    /// Workspace names
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Match names by containment
    #[arg(short, long)]
    pub wildcard: bool,
}

/// Subcommands of 'spaces member'
#[derive(Subcommand, Debug)]
pub enum MemberAction {
    /// List members of workspaces
    List(PatternArgs),
    /// Add users to a workspace
    Add(MemberChangeArgs),
    /// Remove users from a workspace
    Remove(MemberChangeArgs),
}

/// Arguments for 'spaces member add|remove'
#[derive(Parser, Debug)]
pub struct MemberChangeArgs {
    /// Workspace name
    pub space: String,

    /// Users (user name, email or display name)
    #[arg(required = true)]
    pub users: Vec<String>,

    /// Match users by containment
    #[arg(short, long)]
    pub wildcard: bool,
}

/// Subcommands of 'spaces bulk'
#[derive(Subcommand, Debug)]
pub enum BulkAction {
    /// Create workspaces: name,label,disk,memory,template,force,user1,user2,...
    Create(BulkCreateArgs),
    /// Delete the workspaces named in the first column
    Delete(BulkDeleteArgs),
}

/// Arguments for 'spaces bulk create'
#[derive(Parser, Debug)]
pub struct BulkCreateArgs {
    /// CSV file
    pub file: PathBuf,

    /// Header lines to skip
    #[arg(long, default_value_t = defaults::BULK_SKIP)]
    pub skip: usize,

    /// Replace existing workspaces (overrides the force column)
    #[arg(short, long)]
    pub force: bool,

    /// Template workspace for every row (overrides the template column)
    #[arg(short, long)]
    pub template: Option<String>,
}

/// Arguments for 'spaces bulk delete'
#[derive(Parser, Debug)]
pub struct BulkDeleteArgs {
    /// CSV file
    pub file: PathBuf,

    /// Header lines to skip
    #[arg(long, default_value_t = defaults::BULK_SKIP)]
    pub skip: usize,
}
