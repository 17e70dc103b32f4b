use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum ProjectCommands {
    /// List projects visible to the current token.
    List,
}

pub async fn execute(args: ProjectArgs, ctx: CommandContext<'_>) -> Result<()> {
    match args.command {
        ProjectCommands::List => list_projects(&ctx).await,
    }
}

async fn list_projects(ctx: &CommandContext<'_>) -> Result<()> {
    let projects = ctx
        .client
        .list_projects()
        .await
        .context("Failed to list projects")?;

    #[derive(Serialize)]
    struct Row<'a> {
        title: &'a str,
        code: &'a str,
    }

    let rows: Vec<Row<'_>> = projects
        .iter()
        .map(|project| Row {
            title: project.title.as_str(),
            code: project.code.as_str(),
        })
        .collect();

    if rows.is_empty() {
        tracing::info!("No projects returned for this token.");
        return Ok(());
    }

    ctx.renderer.render(&rows)
}
