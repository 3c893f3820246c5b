//! Command execution and script processing
//!
//! A script is a text file with one command line per line, run in file order
//! against one logged-in session. Blank lines and `#` comments are ignored,
//! `exit` stops processing and `config` lines are skipped.

use clap::Parser;
use log::{debug, error, info, warn};
use std::path::Path;

use crate::cli::{Cli, Command};
use crate::dwc::connections::run_connections_command;
use crate::dwc::shares::run_shares_command;
use crate::dwc::spaces::run_spaces_command;
use crate::dwc::users::run_users_command;
use crate::dwc::{Dispatcher, ExternalCommandAdapter, TenantApi};
use crate::error::{DwcError, Result};

/// Run one parsed command against the session
pub async fn execute<A: TenantApi, C: ExternalCommandAdapter>(
    dispatcher: &mut Dispatcher<A, C>,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Spaces { .. } => run_spaces_command(dispatcher, cli).await,
        Command::Users { .. } => run_users_command(dispatcher, cli).await,
        Command::Connections { .. } => run_connections_command(dispatcher, cli).await,
        Command::Shares { .. } => run_shares_command(dispatcher, cli).await,
        Command::Config(_) => {
            warn!("'config' is not available in a session - skipped");
            Ok(())
        }
        Command::Script(_) => Err("scripts cannot be nested".into()),
    }
}

/// Read the command lines of a script
pub fn read_script(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DwcError::InvalidInput(format!("cannot read script '{}': {}", path.display(), e))
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Split a command line into words, honouring single and double quotes
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(DwcError::InvalidInput(format!("unterminated quote in: {}", line)));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Run script lines in order; returns the number of failed lines
///
/// A failing line is logged and processing continues.
pub async fn run_script<A: TenantApi, C: ExternalCommandAdapter>(
    dispatcher: &mut Dispatcher<A, C>,
    lines: &[String],
) -> usize {
    let mut failures = 0;

    for (index, line) in lines.iter().enumerate() {
        let words = match split_command_line(line) {
            Ok(words) => words,
            Err(e) => {
                error!("Line {}: {}", index + 1, e);
                failures += 1;
                continue;
            }
        };

        match words.first().map(String::as_str) {
            Some("exit") => {
                info!("Line {}: exit - stopping script", index + 1);
                break;
            }
            Some("config") => {
                warn!("Line {}: 'config' ignored in scripts", index + 1);
                continue;
            }
            _ => {}
        }

        let cli = match Cli::try_parse_from(std::iter::once("dwcctl".to_string()).chain(words)) {
            Ok(cli) => cli,
            Err(e) => {
                error!("Line {}: {}", index + 1, e.to_string().trim());
                failures += 1;
                continue;
            }
        };

        debug!("Line {}: {}", index + 1, line);
        if let Err(e) = execute(dispatcher, &cli).await {
            error!("Line {} failed: {}", index + 1, e);
            failures += 1;
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwc::testing::{entries, workspace, CallLog, FakeTenant, RecordingAdapter};
    use tempfile::TempDir;

    #[test]
    fn test_split_command_line() {
        assert_eq!(
            split_command_line("spaces create sales --label \"Sales Team\"").unwrap(),
            vec!["spaces", "create", "sales", "--label", "Sales Team"]
        );
        assert_eq!(
            split_command_line("  users   list 'a b'  ").unwrap(),
            vec!["users", "list", "a b"]
        );
        assert_eq!(split_command_line("x \"\"").unwrap(), vec!["x", ""]);
        assert!(split_command_line("bad \"quote").is_err());
    }

    #[test]
    fn test_read_script_filters_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, "# setup\nspaces list\n\n  users list  \n").unwrap();
        assert_eq!(read_script(&path).unwrap(), vec!["spaces list", "users list"]);
    }

    #[test]
    fn test_read_script_missing() {
        assert!(read_script(Path::new("/definitely/missing/script.txt")).is_err());
    }

    #[tokio::test]
    async fn test_run_script_order_exit_and_failures() {
        let dir = TempDir::new().unwrap();
        let calls = CallLog::default();
        let tenant = FakeTenant::new(calls.clone()).with_workspaces(vec![workspace("1", "SALES")]);
        let mut d = Dispatcher::new(tenant, RecordingAdapter::new(calls.clone()), dir.path());
        let out = dir.path().join("out.json");

        let lines = vec![
            "config --url https://x".to_string(),
            format!("spaces member list SALES -o json --output {}", out.display()),
            "spaces bogus".to_string(),
            "spaces delete GHOST".to_string(),
            "spaces delete SALES".to_string(),
            "exit".to_string(),
            "spaces delete SALES".to_string(),
        ];

        let failures = run_script(&mut d, &lines).await;

        assert_eq!(failures, 1);
        assert!(out.exists());
        let deletes = entries(&calls)
            .iter()
            .filter(|c| *c == "CLI spaces delete")
            .count();
        assert_eq!(deletes, 1);
    }
}
