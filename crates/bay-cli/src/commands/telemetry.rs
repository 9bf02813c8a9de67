use anyhow::{Context, bail};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TelemetryCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bayline telemetry`.
pub fn handle(
    action: &TelemetryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let telemetry = ctx.diagnostics.telemetry();
    match action {
        TelemetryCommands::Show => output(&telemetry.summary(), flags.format),
        TelemetryCommands::Export => output(&telemetry.export(), flags.format),
        TelemetryCommands::Import { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            if !telemetry.import(&raw) {
                bail!("{} is not a telemetry export", file.display());
            }
            output(&telemetry.get_all(), flags.format)
        }
        TelemetryCommands::Reset => {
            telemetry.reset_all();
            output(&telemetry.get_all(), flags.format)
        }
    }
}
