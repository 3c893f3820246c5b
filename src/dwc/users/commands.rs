//! User command handlers

use serde_json::Value;

use crate::cli::{Cli, Command, UsersAction};
use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::TenantApi;
use crate::output::{write_output, OutputOptions, Tabular};
use crate::ui::{create_spinner, finish_spinner};

use super::models::{RoleAssignment, UserReport};

impl Tabular for UserReport {
    fn headers() -> &'static [&'static str] {
        &["USER", "EMAIL", "DISPLAY NAME", "DAYS VISITED", "ROLES"]
    }

    fn row(&self) -> Vec<String> {
        let visited = match &self.number_of_days_visited {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        vec![
            self.user_name.clone(),
            self.email.clone().unwrap_or_default(),
            self.display_name.clone().unwrap_or_default(),
            visited,
            self.roles.clone(),
        ]
    }
}

impl Tabular for RoleAssignment {
    fn headers() -> &'static [&'static str] {
        &["USER", "ROLE"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.user_name.clone(), self.role_name.clone()]
    }
}

/// Run a 'users' subcommand
pub async fn run_users_command<A: TenantApi, C: ExternalCommandAdapter>(
    dispatcher: &mut Dispatcher<A, C>,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let Command::Users {
        action: UsersAction::List(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let patterns = if args.users.is_empty() {
        NamePatterns::all()
    } else {
        NamePatterns::from(args.users.as_slice())
    };

    let spinner = create_spinner("Fetching users...", cli.batch);
    let users = dispatcher.resolve_users(&patterns, !args.exact).await;
    finish_spinner(spinner);
    let users = users?;

    let options = OutputOptions::from(cli);
    if args.roles {
        let roles: Vec<RoleAssignment> = users.iter().flat_map(|u| u.roles_list()).collect();
        write_output(&roles, &options)?;
    } else {
        let reports: Vec<UserReport> = users.iter().map(UserReport::from).collect();
        write_output(&reports, &options)?;
    }
    Ok(())
}
