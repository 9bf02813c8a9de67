use anyhow::{Context, bail};
use bay_core::enums::{Capability, CapabilityState};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CapsCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CapabilityRow {
    capability: Capability,
    state: CapabilityState,
    should_attempt: bool,
}

/// Handle `bayline caps`.
pub fn handle(action: &CapsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let capabilities = ctx.diagnostics.capabilities();
    match action {
        CapsCommands::Show => {
            let rows = capabilities
                .states()
                .into_iter()
                .map(|(capability, state)| CapabilityRow {
                    capability,
                    state,
                    should_attempt: state.should_attempt(),
                })
                .collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        CapsCommands::Reset { capability } => {
            match capability {
                Some(capability) => capabilities.reset(*capability),
                None => ctx.diagnostics.reset_session(),
            }
            output(&capabilities.export_all(), flags.format)
        }
        CapsCommands::Export => output(&capabilities.export_all(), flags.format),
        CapsCommands::Import { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            if !capabilities.import_all(&raw) {
                bail!(
                    "{} is not a capability object of known names and boolean values",
                    file.display()
                );
            }
            output(&capabilities.export_all(), flags.format)
        }
    }
}
