//! User command arguments

use clap::{Parser, Subcommand};

/// Subcommands of 'users'
#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// List tenant users
    List(UserListArgs),
}

/// Arguments for 'users list'
#[derive(Parser, Debug)]
pub struct UserListArgs {
    /// User name, email or display name; all users when omitted
    pub users: Vec<String>,

    /// Only exact user name or email matches
    #[arg(short, long)]
    pub exact: bool,

    /// One row per (user, role) pair
    #[arg(short, long)]
    pub roles: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        action: UsersAction,
    }

    #[test]
    fn test_list_defaults() {
        let UsersAction::List(args) = TestCli::parse_from(["test", "list"]).action;
        assert!(args.users.is_empty());
        assert!(!args.exact);
        assert!(!args.roles);
    }

    #[test]
    fn test_list_exact_roles() {
        let UsersAction::List(args) =
            TestCli::parse_from(["test", "list", "jane@x.com", "--exact", "-r"]).action;
        assert_eq!(args.users, vec!["jane@x.com"]);
        assert!(args.exact);
        assert!(args.roles);
    }
}
