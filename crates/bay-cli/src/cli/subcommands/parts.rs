use std::path::PathBuf;

use clap::Subcommand;

/// Line item commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PartsCommands {
    /// List line items on a job.
    List { job_id: String },
    /// Append line items read from a JSON array file.
    Add {
        job_id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace every line item on a job with the contents of a JSON array file.
    Replace {
        job_id: String,
        #[arg(long)]
        file: PathBuf,
    },
}
