//! dwcctl - Main entry point

use clap::Parser;
use log::{debug, error, info};
use std::process::ExitCode;

use dwcctl::{
    execute, read_script, run_config_command, run_script, Cli, Command, Dispatcher,
    ProcessAdapter, SamlAuthClient, SessionContext, SettingsStore,
};
use dwcctl::ui::{create_spinner, finish_spinner, finish_spinner_with_message};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting dwcctl v{}", env!("CARGO_PKG_VERSION"));
    debug!("CLI args: {:?}", cli);

    let store = SettingsStore::resolve(cli.config.as_deref());

    if let Command::Config(args) = &cli.command {
        return match run_config_command(&store, args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    // Read the script before logging in so a bad path fails fast
    let script = match &cli.command {
        Command::Script(args) => match read_script(&args.file) {
            Ok(lines) => Some(lines),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        _ => None,
    };

    let config = match store.load_existing() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let credentials = match config.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session =
        SessionContext::new(&credentials.url, &credentials.user, &credentials.password);
    let spinner = create_spinner(&format!("Logging in to {}...", credentials.url), cli.batch);
    if !session.login(&SamlAuthClient).await {
        finish_spinner(spinner);
        error!("Login to {} failed", credentials.url);
        return ExitCode::FAILURE;
    }
    finish_spinner_with_message(spinner, &format!("Logged in as {}", credentials.user));

    let mut dispatcher = Dispatcher::new(
        session,
        ProcessAdapter::new(config.cli_path()),
        store.work_dir(),
    );

    match script {
        Some(lines) => {
            let failures = run_script(&mut dispatcher, &lines).await;
            if failures > 0 {
                info!("Script completed with {} failed line(s)", failures);
            } else {
                info!("Script completed successfully");
            }
            ExitCode::SUCCESS
        }
        None => match execute(&mut dispatcher, &cli).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
