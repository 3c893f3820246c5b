//! Share command handlers

use crate::cli::{Cli, Command, SharesAction};
use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::TenantApi;
use crate::output::{write_output, OutputOptions, Tabular};
use crate::ui::{create_spinner, finish_spinner};

use super::models::ShareRecord;

impl Tabular for ShareRecord {
    fn headers() -> &'static [&'static str] {
        &["SPACE", "OBJECT", "TARGET SPACE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.space_name.clone(),
            self.object_name.clone(),
            self.target_space.clone(),
        ]
    }
}

/// Run a 'shares' subcommand
pub async fn run_shares_command<A: TenantApi, C: ExternalCommandAdapter>(
    dispatcher: &mut Dispatcher<A, C>,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let Command::Shares { action } = &cli.command else {
        unreachable!()
    };

    match action {
        SharesAction::Create(args) => {
            let payload = dispatcher
                .create_share(
                    &args.source,
                    &args.object,
                    &NamePatterns::from(args.targets.as_slice()),
                    args.wildcard,
                )
                .await?;
            println!(
                "✓ Shared '{}' from {} with {}",
                args.object,
                payload.space_name,
                payload.share_space_names.join(", ")
            );
        }
        SharesAction::List(args) => {
            let spinner = create_spinner("Fetching shares...", cli.batch);
            let shares = dispatcher.list_shares(&args.patterns(), args.wildcard).await;
            finish_spinner(spinner);
            write_output(&shares?, &OutputOptions::from(cli))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_row() {
        let record = ShareRecord {
            space_name: "SRC".to_string(),
            object_name: "V_SALES".to_string(),
            target_space: "TGT".to_string(),
        };
        assert_eq!(record.row(), vec!["SRC", "V_SALES", "TGT"]);
        assert_eq!(ShareRecord::headers().len(), 3);
    }
}
