use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use qase_cli_api::models::{TestCaseRequest, TestCaseStep};

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct CaseArgs {
    #[command(subcommand)]
    command: CaseCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum CaseCommands {
    /// Create a test case in a project.
    Create(CreateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Project code the case is created in (e.g. QTD).
    #[arg(value_name = "PROJECT_CODE")]
    project_code: String,

    /// Case title.
    #[arg(long)]
    title: String,

    /// Case description.
    #[arg(long, default_value = "")]
    description: String,

    /// Suite to file the case under.
    #[arg(long)]
    suite_id: Option<u64>,

    /// Severity, 1 (blocker) to 5 (trivial). Validated by the server.
    #[arg(long, default_value_t = 3)]
    severity: i64,

    /// Priority, 1 (high) to 3 (low). Validated by the server.
    #[arg(long, default_value_t = 1)]
    priority: i64,

    /// Status, 0 (actual) or 1 (draft). Validated by the server.
    #[arg(long, default_value_t = 0)]
    status: i64,

    /// Step as "<action> => <expected result>". Repeatable; steps keep
    /// the order they are given in.
    #[arg(long = "step", value_name = "STEP")]
    steps: Vec<String>,
}

pub async fn execute(args: CaseArgs, ctx: CommandContext<'_>) -> Result<()> {
    match args.command {
        CaseCommands::Create(args) => create_case(&ctx, args).await,
    }
}

async fn create_case(ctx: &CommandContext<'_>, args: CreateArgs) -> Result<()> {
    let request = TestCaseRequest {
        title: args.title,
        description: args.description,
        suite_id: args.suite_id,
        severity: args.severity,
        priority: args.priority,
        status: args.status,
        steps: args.steps.iter().map(|raw| parse_step(raw)).collect(),
    };

    let created = ctx
        .client
        .create_case(&args.project_code, &request)
        .await
        .with_context(|| {
            format!(
                "Failed to create test case in project {}",
                args.project_code
            )
        })?;

    tracing::info!(id = created.id, project = %args.project_code, "Test case created");
    println!("✅ Created test case (ID: {})", created.id);
    Ok(())
}

/// Splits a raw `--step` value on the first `=>`. A step without an arrow
/// is an action with an empty expected result.
fn parse_step(raw: &str) -> TestCaseStep {
    match raw.split_once("=>") {
        Some((action, expected)) => TestCaseStep {
            action: action.trim().to_string(),
            expected_result: expected.trim().to_string(),
        },
        None => TestCaseStep {
            action: raw.trim().to_string(),
            expected_result: String::new(),
        },
    }
}
