use bay_core::identity::{OrgContext, Principal};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct WhoamiResponse {
    principal: Option<Principal>,
    org: OrgContext,
}

/// Handle `bayline whoami`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let org = match &ctx.service {
        Some(service) => service.org_context().await,
        None => OrgContext::unresolved(ctx.principal.as_ref()),
    };
    output(
        &WhoamiResponse {
            principal: ctx.principal.clone(),
            org,
        },
        flags.format,
    )
}
