use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use qase_cli_api::QaseClient;
use qase_cli_config::Config;
use qase_cli_output::OutputRenderer;
use serde::Serialize;
use url::Url;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Add or update a profile
    Set(SetArgs),
    /// List configured profiles
    List,
    /// Verify that the active credentials can reach the API
    Test(TestArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Profile name to create or update.
    #[arg(long)]
    pub profile: String,
    /// API base URL stored in the profile (defaults to the public endpoint).
    #[arg(long)]
    pub base_url: Option<String>,
    /// API token to store (falls back to QASE_API_TOKEN).
    #[arg(long, env = "QASE_API_TOKEN")]
    pub token: Option<String>,
    /// Mark this profile as the default one.
    #[arg(long)]
    pub default: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Profile to test (defaults to the default profile).
    #[arg(long)]
    pub profile: Option<String>,
}

pub async fn handle(
    command: ConfigCommand,
    config: &mut Config,
    config_path: Option<&Path>,
    renderer: &OutputRenderer,
) -> Result<()> {
    match command {
        ConfigCommand::Set(args) => set(args, config, config_path),
        ConfigCommand::List => list_profiles(config, renderer),
        ConfigCommand::Test(args) => test_connection(args, config).await,
    }
}

fn set(args: SetArgs, config: &mut Config, config_path: Option<&Path>) -> Result<()> {
    if args.profile.trim().is_empty() {
        return Err(anyhow!("Profile name cannot be empty"));
    }

    if let Some(base_url) = &args.base_url {
        Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
    }

    let profile_entry = config.profiles.entry(args.profile.clone()).or_default();
    if args.base_url.is_some() {
        profile_entry.base_url = args.base_url.clone();
    }
    if let Some(token) = args.token.as_deref().map(str::trim) {
        if token.is_empty() {
            return Err(anyhow!("API token cannot be empty"));
        }
        profile_entry.api_token = Some(token.to_owned());
    }

    if args.default || config.default_profile.is_none() {
        config.default_profile = Some(args.profile.clone());
    }

    config
        .save(config_path)
        .context("Unable to persist configuration file")?;

    tracing::info!(profile = %args.profile, "Profile saved");
    Ok(())
}

fn list_profiles(config: &Config, renderer: &OutputRenderer) -> Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        name: &'a str,
        base_url: &'a str,
        has_token: bool,
        is_default: bool,
    }

    let mut rows = Vec::new();
    for (name, profile) in &config.profiles {
        rows.push(Row {
            name,
            base_url: profile.base_url.as_deref().unwrap_or(""),
            has_token: profile.api_token.is_some(),
            is_default: config
                .default_profile
                .as_deref()
                .map(|default_name| default_name == name)
                .unwrap_or(false),
        });
    }

    if rows.is_empty() {
        tracing::info!("No profiles configured yet. Use `qase-cli config set` to add one.");
    }

    renderer.render(&rows)
}

async fn test_connection(args: TestArgs, config: &Config) -> Result<()> {
    let (profile_name, profile) = config
        .resolve_profile(args.profile.as_deref())
        .context("No profile found. Use `qase-cli config set` to create one.")?;

    let base_url = profile
        .base_url
        .as_deref()
        .unwrap_or(qase_cli_api::DEFAULT_BASE_URL);
    let token = std::env::var("QASE_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| profile.api_token.clone())
        .context("No API token found. Set QASE_API_TOKEN or store one in the profile.")?;

    println!("Testing connection for profile '{profile_name}'...");

    let client = QaseClient::new(base_url, token)?;
    match client.list_projects().await {
        Ok(projects) => {
            let message = format!("Token works, {} project(s) visible.", projects.len());
            println!("{}", message.green());
            Ok(())
        }
        Err(err) => {
            println!("{}", format!("Connection test failed: {err}").red());
            Err(err.into())
        }
    }
}
