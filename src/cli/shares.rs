//! Share command arguments

use clap::{Parser, Subcommand};

use super::common::PatternArgs;

/// Subcommands of 'shares'
#[derive(Subcommand, Debug)]
pub enum SharesAction {
    /// Share an object with other workspaces
    Create(ShareCreateArgs),
    /// List shared objects and their target workspaces
    List(PatternArgs),
}

/// Arguments for 'shares create'
#[derive(Parser, Debug)]
pub struct ShareCreateArgs {
    /// Source workspace
    pub source: String,

    /// Object to share
    pub object: String,

    /// Target workspaces
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Match target workspaces by containment
    #[arg(short, long)]
    pub wildcard: bool,
}
