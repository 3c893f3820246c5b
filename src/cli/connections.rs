//! Connection command arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::common::PatternArgs;

/// Subcommands of 'connections'
#[derive(Subcommand, Debug)]
pub enum ConnectionsAction {
    /// List connections of workspaces
    List(ConnectionListArgs),
    /// Create a connection from a JSON definition in workspaces
    Create(ConnectionCreateArgs),
    /// Delete a connection from workspaces
    Delete(ConnectionDeleteArgs),
}

/// Arguments for 'connections list'
#[derive(Parser, Debug)]
pub struct ConnectionListArgs {
    #[command(flatten)]
    pub spaces: PatternArgs,

    /// Only this connection
    #[arg(short, long)]
    pub connection: Option<String>,
}

/// Arguments for 'connections create'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        dwcctl connections create hana.json -s SALES -s HR\n  \
        dwcctl connections create hana.json -s SALES -w --force")]
pub struct ConnectionCreateArgs {
    /// Connection definition ({\"data\": {\"name\": ...}})
    pub file: PathBuf,

    /// Workspaces to create the connection in
    #[arg(short, long = "space", required = true)]
    pub spaces: Vec<String>,

    /// Match workspaces by containment
    #[arg(short, long)]
    pub wildcard: bool,

    /// Replace an existing connection of the same name
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for 'connections delete'
#[derive(Parser, Debug)]
pub struct ConnectionDeleteArgs {
    /// Connection name
    pub name: String,

    /// Workspaces to delete the connection from
    #[arg(short, long = "space", required = true)]
    pub spaces: Vec<String>,

    /// Match workspaces by containment
    #[arg(short, long)]
    pub wildcard: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        action: ConnectionsAction,
    }

    #[test]
    fn test_structure() {
        TestCli::command().debug_assert();
    }

    #[test]
    fn test_create_args() {
        let cli = TestCli::parse_from(["test", "create", "c.json", "-s", "A", "-s", "B", "-f"]);
        let ConnectionsAction::Create(args) = cli.action else {
            panic!("expected create");
        };
        assert_eq!(args.file, PathBuf::from("c.json"));
        assert_eq!(args.spaces, vec!["A", "B"]);
        assert!(args.force);
    }

    #[test]
    fn test_delete_requires_space() {
        assert!(TestCli::try_parse_from(["test", "delete", "HANA"]).is_err());
    }

    #[test]
    fn test_list_filter() {
        let cli = TestCli::parse_from(["test", "list", "SALES", "-c", "HANA"]);
        let ConnectionsAction::List(args) = cli.action else {
            panic!("expected list");
        };
        assert_eq!(args.spaces.names, vec!["SALES"]);
        assert_eq!(args.connection.as_deref(), Some("HANA"));
    }
}
