//! Connection command handlers

use serde_json::Value;

use crate::cli::{Cli, Command, ConnectionsAction};
use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::TenantApi;
use crate::output::{write_output, OutputOptions, Tabular};
use crate::ui::{create_spinner, finish_spinner};

use super::models::{ConnectionDefinition, ConnectionRecord};

impl Tabular for ConnectionRecord {
    fn headers() -> &'static [&'static str] {
        &["SPACE ID", "NAME", "ID", "TYPE"]
    }

    fn row(&self) -> Vec<String> {
        let kind = self
            .extra
            .get("typeId")
            .and_then(Value::as_str)
            .unwrap_or_default();
        vec![
            self.space_id.clone().unwrap_or_default(),
            self.name.clone(),
            self.id.clone(),
            kind.to_string(),
        ]
    }
}

/// Run a 'connections' subcommand
pub async fn run_connections_command<A: TenantApi, C: ExternalCommandAdapter>(
    dispatcher: &mut Dispatcher<A, C>,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let Command::Connections { action } = &cli.command else {
        unreachable!()
    };

    match action {
        ConnectionsAction::List(args) => {
            let spinner = create_spinner("Fetching connections...", cli.batch);
            let connections = dispatcher
                .list_connections(
                    &args.spaces.patterns(),
                    args.spaces.wildcard,
                    args.connection.as_deref(),
                )
                .await;
            finish_spinner(spinner);
            write_output(&connections?, &OutputOptions::from(cli))?;
        }
        ConnectionsAction::Create(args) => {
            let definition = ConnectionDefinition::from_file(&args.file)?;
            let spaces = dispatcher
                .create_connections(
                    &NamePatterns::from(args.spaces.as_slice()),
                    args.wildcard,
                    &definition,
                    args.force,
                )
                .await?;
            println!(
                "✓ Created connection '{}' in {}",
                definition.name(),
                spaces.join(", ")
            );
        }
        ConnectionsAction::Delete(args) => {
            let spaces = dispatcher
                .delete_connections(
                    &NamePatterns::from(args.spaces.as_slice()),
                    args.wildcard,
                    &args.name,
                )
                .await?;
            if spaces.is_empty() {
                println!("Connection '{}' not found", args.name);
            } else {
                println!("✓ Deleted connection '{}' from {}", args.name, spaces.join(", "));
            }
        }
    }
    Ok(())
}
