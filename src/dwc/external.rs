//! External command-line utility adapter
//!
//! Workspace create and delete are not covered by the HTTP interface the
//! engine talks to. They are delegated to the vendor's command-line utility
//! behind `ExternalCommandAdapter`, so dispatcher logic can be exercised with
//! a recording fake.

use async_trait::async_trait;
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::process::Command;

use crate::error::{DwcError, Result};

/// Exit status and combined output of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub output: String,
}

/// Runs the external utility with the given arguments
#[async_trait]
pub trait ExternalCommandAdapter: Send + Sync {
    /// Run with `args`; a non-zero exit is reported as `DwcError::Command`
    async fn run(&self, args: &[String]) -> Result<CommandOutput>;
}

/// Adapter spawning the configured binary
#[derive(Debug, Clone)]
pub struct ProcessAdapter {
    program: PathBuf,
}

impl ProcessAdapter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl ExternalCommandAdapter for ProcessAdapter {
    async fn run(&self, args: &[String]) -> Result<CommandOutput> {
        let started = Instant::now();
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| DwcError::Command {
                exit_code: -1,
                output: format!("cannot run '{}': {}", self.program.display(), e),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        let exit_code = output.status.code().unwrap_or(-1);

        debug!(
            "{} {} -> exit {} ({:?})",
            self.program.display(),
            args.first().map(String::as_str).unwrap_or_default(),
            exit_code,
            started.elapsed()
        );

        if !output.status.success() {
            error!("Invalid command result: {}", text.trim());
            return Err(DwcError::Command {
                exit_code,
                output: text,
            });
        }

        Ok(CommandOutput {
            exit_code,
            output: text,
        })
    }
}

/// Arguments deleting a workspace
pub fn delete_space_args(host: &str, space_id: &str, passcode: &str) -> Vec<String> {
    [
        "spaces", "delete", "-F", "-H", host, "-s", space_id, "-p", passcode,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Arguments creating (or updating) a workspace from a definition file
pub fn create_space_args(host: &str, definition_file: &Path, passcode: &str) -> Vec<String> {
    vec![
        "spaces".to_string(),
        "create".to_string(),
        "-H".to_string(),
        host.to_string(),
        "-f".to_string(),
        definition_file.display().to_string(),
        "-p".to_string(),
        passcode.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_args() {
        let args = delete_space_args("https://t", "SALES", "ABC");
        assert_eq!(
            args,
            vec!["spaces", "delete", "-F", "-H", "https://t", "-s", "SALES", "-p", "ABC"]
        );
    }

    #[test]
    fn test_create_args() {
        let args = create_space_args("https://t", Path::new("/tmp/SALES.json"), "XYZ");
        assert_eq!(args[1], "create");
        assert_eq!(args[5], "/tmp/SALES.json");
        assert_eq!(args[7], "XYZ");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_adapter_success() {
        let adapter = ProcessAdapter::new("echo");
        let output = adapter.run(&["hello".to_string()]).await.unwrap();
        assert_eq!(output.exit_code, 0);
        assert!(output.output.contains("hello"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_adapter_failure_exit() {
        let adapter = ProcessAdapter::new("false");
        match adapter.run(&[]).await {
            Err(DwcError::Command { exit_code, .. }) => assert_eq!(exit_code, 1),
            other => panic!("Expected Command error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_process_adapter_missing_binary() {
        let adapter = ProcessAdapter::new("/definitely/not/here/dwc");
        assert!(matches!(
            adapter.run(&[]).await,
            Err(DwcError::Command { exit_code: -1, .. })
        ));
    }
}
