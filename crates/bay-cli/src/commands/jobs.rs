use bay_db::JobFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{JobArgs, JobsArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `bayline jobs`.
pub async fn handle_list(
    args: &JobsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = JobFilter {
        status: args.status.clone(),
        limit: args.limit,
    };
    let jobs = ctx.require_service()?.list_jobs(&filter).await?;
    output(&jobs, flags.format)
}

/// Handle `bayline job <id>`.
pub async fn handle_get(
    args: &JobArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let job = ctx.require_service()?.get_job(&args.job_id).await?;
    output(&job, flags.format)
}

/// Handle `bayline vendor <id>`.
pub async fn handle_vendor(
    args: &JobArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let summary = ctx
        .require_service()?
        .job_vendor_summary(&args.job_id)
        .await?;
    output(&summary, flags.format)
}
