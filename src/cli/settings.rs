//! Settings command arguments

use clap::Parser;

/// Arguments for 'config'
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
        dwcctl config --url https://acme.eu10.hcs.cloud.sap --user admin@acme.com --password\n  \
        dwcctl config --cli /opt/dwc/bin/dwc\n  \
        dwcctl config --show")]
pub struct ConfigArgs {
    /// Tenant URL
    #[arg(long)]
    pub url: Option<String>,

    /// Login user
    #[arg(long)]
    pub user: Option<String>,

    /// Login password; without a value it is prompted for (hidden input)
    #[arg(long, num_args = 0..=1)]
    pub password: Option<Option<String>>,

    /// Path of the external command-line utility
    #[arg(long = "cli")]
    pub cli_path: Option<String>,

    /// Print the current settings (password masked)
    #[arg(long)]
    pub show: bool,
}

impl ConfigArgs {
    /// Whether any setting is being changed
    pub fn has_changes(&self) -> bool {
        self.url.is_some() || self.user.is_some() || self.password.is_some() || self.cli_path.is_some()
    }
}
