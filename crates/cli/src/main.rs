mod commands;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use commands::config_cmd::{self, ConfigCommand};
use commands::CommandContext;
use qase_cli_api::{QaseClient, DEFAULT_BASE_URL};
use qase_cli_config::Config;
use qase_cli_output::{OutputFormat, OutputRenderer};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "qase-cli", version, about = "Qase test management CLI", long_about = None)]
struct Cli {
    /// Profile to use from config file
    #[arg(short, long)]
    profile: Option<String>,

    /// Path to config file (defaults to ~/.qase-cli/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the Qase API (defaults to the public endpoint)
    #[arg(long)]
    base_url: Option<String>,

    /// Output format for command results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Enable verbose logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: QaseCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum QaseCommand {
    /// Project commands
    Project(commands::project::ProjectArgs),
    /// Test case commands
    Case(commands::case::CaseArgs),
    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Tokens are commonly kept in a local .env file; absence is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config_path = cli.config.clone();
    let mut config = Config::load(config_path.as_ref())?;
    let renderer = OutputRenderer::new(cli.output);

    match cli.command {
        QaseCommand::Project(args) => {
            let client = build_client(&config, cli.profile.as_deref(), cli.base_url.as_deref())?;
            let ctx = CommandContext {
                client,
                renderer: &renderer,
            };
            commands::project::execute(args, ctx).await?
        }
        QaseCommand::Case(args) => {
            let client = build_client(&config, cli.profile.as_deref(), cli.base_url.as_deref())?;
            let ctx = CommandContext {
                client,
                renderer: &renderer,
            };
            commands::case::execute(args, ctx).await?
        }
        QaseCommand::Config(command) => {
            config_cmd::handle(command, &mut config, config_path.as_deref(), &renderer).await?
        }
    }

    Ok(())
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug {
        "info,qase_cli=debug,qase_cli_api=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

/// Settings needed to talk to the API, resolved from flags, environment
/// and the config file before any network call happens.
struct ActiveSettings {
    base_url: String,
    token: String,
}

fn resolve_settings(
    config: &Config,
    requested_profile: Option<&str>,
    base_url_flag: Option<&str>,
) -> Result<ActiveSettings> {
    let profile = match requested_profile {
        Some(name) => Some(config.profile(name).ok_or_else(|| {
            anyhow!("Unknown profile '{name}'. Add it with `qase-cli config set --profile {name}`.")
        })?),
        None => config.resolve_profile(None).map(|(_, profile)| profile),
    };

    // Token lookup: environment first (blank values ignored), then the
    // resolved profile.
    let token = std::env::var("QASE_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            profile
                .and_then(|p| p.api_token.clone())
                .filter(|t| !t.trim().is_empty())
        })
        .ok_or_else(|| {
            anyhow!(
                "No API token found. Set the QASE_API_TOKEN environment variable \
                 or store one with `qase-cli config set`."
            )
        })?;

    let base_url = base_url_flag
        .map(str::to_string)
        .or_else(|| profile.and_then(|p| p.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Ok(ActiveSettings { base_url, token })
}

fn build_client(
    config: &Config,
    requested_profile: Option<&str>,
    base_url_flag: Option<&str>,
) -> Result<QaseClient> {
    let settings = resolve_settings(config, requested_profile, base_url_flag)?;
    Ok(QaseClient::new(&settings.base_url, settings.token)?)
}
