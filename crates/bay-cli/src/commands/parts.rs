use std::path::Path;

use anyhow::Context;
use bay_core::entities::LineItemInput;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PartsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bayline parts`.
pub async fn handle(
    action: &PartsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.require_service()?;
    let parts = match action {
        PartsCommands::List { job_id } => service.list_job_parts(job_id).await?,
        PartsCommands::Add { job_id, file } => {
            let items = read_items(file)?;
            service.insert_job_parts(job_id, &items).await?
        }
        PartsCommands::Replace { job_id, file } => {
            let items = read_items(file)?;
            service.replace_job_parts(job_id, &items).await?
        }
    };
    output(&parts, flags.format)
}

fn read_items(path: &Path) -> anyhow::Result<Vec<LineItemInput>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_items(&raw).with_context(|| format!("invalid line items in {}", path.display()))
}

fn parse_items(raw: &str) -> anyhow::Result<Vec<LineItemInput>> {
    Ok(serde_json::from_str(raw)?)
}
