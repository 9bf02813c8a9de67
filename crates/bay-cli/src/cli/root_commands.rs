use clap::{Args, Subcommand};

use crate::cli::subcommands::{CapsCommands, LogsCommands, PartsCommands, TelemetryCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Jobs visible to the current org.
    Jobs(JobsArgs),
    /// Show a single job.
    Job(JobArgs),
    /// Line items on a job.
    Parts {
        #[command(subcommand)]
        action: PartsCommands,
    },
    /// Vendor display name for a job.
    Vendor(JobArgs),
    /// Show the acting principal and resolved org.
    Whoami,
    /// Schema capability flags.
    Caps {
        #[command(subcommand)]
        action: CapsCommands,
    },
    /// Fallback counters.
    Telemetry {
        #[command(subcommand)]
        action: TelemetryCommands,
    },
    /// Structured session logs.
    Logs {
        #[command(subcommand)]
        action: LogsCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct JobsArgs {
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct JobArgs {
    pub job_id: String,
}
