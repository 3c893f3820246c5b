//! Workspace command handlers

use log::debug;
use serde_json::Value;

use crate::cli::{BulkAction, Cli, Command, MemberAction, SpacesAction};
use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::TenantApi;
use crate::output::{write_output, OutputOptions, Tabular};
use crate::ui::{create_spinner, finish_spinner};

use super::bulk::BulkSummary;
use super::models::{MemberRow, WorkspaceDetail};
use super::ops::{CreateSpaceRequest, MembershipChange};

impl Tabular for WorkspaceDetail {
    fn headers() -> &'static [&'static str] {
        &[
            "NAME",
            "ID",
            "LABEL",
            "MEMBERS",
            "DB USERS",
            "DATA BUILDER",
            "REMOTE TABLES",
            "BUSINESS BUILDER",
        ]
    }

    fn row(&self) -> Vec<String> {
        let label = self
            .record
            .label
            .as_deref()
            .or_else(|| self.definition.as_ref().and_then(|d| d.label_text()))
            .unwrap_or_default();
        let (members, dbusers) = self
            .definition
            .as_ref()
            .map(|d| (d.members.len(), d.dbusers.len()))
            .unwrap_or_default();

        vec![
            self.record.name.clone(),
            self.record.id.clone(),
            label.to_string(),
            members.to_string(),
            dbusers.to_string(),
            self.data_builder.len().to_string(),
            self.remote_tables.len().to_string(),
            self.business_builder.len().to_string(),
        ]
    }
}

impl Tabular for MemberRow {
    fn headers() -> &'static [&'static str] {
        &["SPACE", "MEMBER", "TYPE"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.space_name.clone(), self.name.clone(), self.kind.clone()]
    }
}

/// Run a 'spaces' subcommand
pub async fn run_spaces_command<A: TenantApi, C: ExternalCommandAdapter>(
    dispatcher: &mut Dispatcher<A, C>,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let Command::Spaces { action } = &cli.command else {
        unreachable!()
    };
    let options = OutputOptions::from(cli);

    match action {
        SpacesAction::List(args) => {
            let spinner = create_spinner("Fetching workspaces...", cli.batch);
            let details = dispatcher.list_spaces(&args.patterns(), args.wildcard).await;
            finish_spinner(spinner);
            write_output(&details?, &options)?;
        }
        SpacesAction::Create(args) => {
            let request = CreateSpaceRequest {
                name: args.name.clone(),
                label: args.label.clone().map(Value::String),
                template: args.template.clone(),
                disk: args.disk,
                memory: args.memory,
                users: args.users.clone(),
                force: args.force,
            };
            debug!("Create request: {:?}", request);
            let created = dispatcher.create_space(&request).await?;
            println!("✓ Created workspace '{}'", created.identifier);
        }
        SpacesAction::Delete(args) => {
            let patterns = NamePatterns::from(args.names.as_slice());
            let deleted = dispatcher.delete_spaces(&patterns, args.wildcard).await?;
            for name in &deleted {
                println!("✓ Deleted workspace '{}'", name);
            }
        }
        SpacesAction::Member { action } => run_member_command(dispatcher, action, &options).await?,
        SpacesAction::Bulk { action } => {
            let summary = match action {
                BulkAction::Create(args) => {
                    dispatcher
                        .bulk_create(&args.file, args.skip, args.force, args.template.as_deref())
                        .await?
                }
                BulkAction::Delete(args) => dispatcher.bulk_delete(&args.file, args.skip).await?,
            };
            print_summary(&summary);
        }
    }
    Ok(())
}

async fn run_member_command<A: TenantApi, C: ExternalCommandAdapter>(
    dispatcher: &mut Dispatcher<A, C>,
    action: &MemberAction,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (args, change) = match action {
        MemberAction::List(args) => {
            let rows = dispatcher
                .list_members(&args.patterns(), args.wildcard)
                .await?;
            write_output(&rows, options)?;
            return Ok(());
        }
        MemberAction::Add(args) => (args, MembershipChange::Add),
        MemberAction::Remove(args) => (args, MembershipChange::Remove),
    };

    let changed = dispatcher
        .change_members(
            &args.space,
            &NamePatterns::from(args.users.as_slice()),
            args.wildcard,
            change,
        )
        .await?;
    println!("✓ {} membership change(s) in '{}'", changed, args.space.to_uppercase());
    Ok(())
}

fn print_summary(summary: &BulkSummary) {
    println!(
        "✓ {} succeeded, {} failed",
        summary.succeeded.len(),
        summary.failed.len()
    );
    for name in &summary.failed {
        println!("  ✗ {}", name);
    }
}
