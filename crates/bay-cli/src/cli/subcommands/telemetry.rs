use std::path::PathBuf;

use clap::Subcommand;

/// Telemetry counter commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TelemetryCommands {
    /// Counters with backing store and time since reset.
    Show,
    /// Print the export envelope.
    Export,
    /// Add counters from an export file.
    Import { file: PathBuf },
    /// Zero every counter.
    Reset,
}
