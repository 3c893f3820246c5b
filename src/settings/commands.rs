//! Settings command handler

use dialoguer::Password;

use crate::cli::ConfigArgs;
use crate::error::DwcError;

use super::models::TenantConfig;
use super::obfuscate::obfuscate;
use super::store::SettingsStore;

/// Update and/or show the settings file
pub fn run_config_command(
    store: &SettingsStore,
    args: &ConfigArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = store.load()?;

    if args.has_changes() {
        let password = match &args.password {
            Some(Some(password)) => Some(password.clone()),
            Some(None) => Some(prompt_password()?),
            None => None,
        };
        apply_changes(&mut config, args, password.as_deref())?;
        store.save(&config)?;
        println!("✓ Saved settings to {}", store.path().display());
    }

    if args.show || !args.has_changes() {
        print_settings(store, &config);
    }
    Ok(())
}

/// Merge the given fields into the settings
fn apply_changes(
    config: &mut TenantConfig,
    args: &ConfigArgs,
    password: Option<&str>,
) -> Result<(), DwcError> {
    if let Some(url) = &args.url {
        config.url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(user) = &args.user {
        config.user = Some(user.clone());
    }
    if let Some(password) = password {
        config.password = Some(obfuscate(password)?);
    }
    if let Some(cli) = &args.cli_path {
        config.cli_path = Some(cli.clone());
    }
    Ok(())
}

fn prompt_password() -> Result<String, DwcError> {
    Password::new()
        .with_prompt("Tenant password")
        .interact()
        .map_err(|e| DwcError::Config(format!("Failed to read password: {}", e)))
}

fn print_settings(store: &SettingsStore, config: &TenantConfig) {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "<not set>".to_string());

    println!("Settings file: {}", store.path().display());
    println!("  URL:      {}", show(&config.url));
    println!("  User:     {}", show(&config.user));
    println!(
        "  Password: {}",
        if config.password.is_some() { "****" } else { "<not set>" }
    );
    println!("  CLI:      {}", config.cli_path());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::obfuscate::reveal;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_apply_changes_merges_fields() {
        let mut config = TenantConfig {
            url: Some("https://old".to_string()),
            user: Some("keep@me".to_string()),
            ..Default::default()
        };
        let args = ConfigArgs::parse_from(["config", "--url", "https://new/"]);

        apply_changes(&mut config, &args, Some("pw")).unwrap();

        assert_eq!(config.url.as_deref(), Some("https://new"));
        assert_eq!(config.user.as_deref(), Some("keep@me"));
        assert_eq!(reveal(config.password.as_deref().unwrap()).unwrap(), "pw");
    }

    #[test]
    fn test_run_config_command_writes_file() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::with_path(dir.path().join("config.json"));
        let args = ConfigArgs::parse_from([
            "config",
            "--url",
            "https://t.example",
            "--user",
            "me",
            "--password",
            "secret",
        ]);

        run_config_command(&store, &args).unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.credentials().unwrap().password, "secret");
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("secret"));
    }
}
