use std::path::PathBuf;

use bay_core::enums::Capability;
use clap::Subcommand;

/// Capability flag commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CapsCommands {
    /// Show every capability and its probe state.
    Show,
    /// Forget one capability, or all of them.
    Reset {
        /// Capability name, e.g. `jobPartsVendorRel`.
        capability: Option<Capability>,
    },
    /// Print known flags as a JSON object.
    Export,
    /// Apply flags from a JSON object file.
    Import { file: PathBuf },
}
