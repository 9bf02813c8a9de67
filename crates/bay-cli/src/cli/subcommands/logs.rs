use bay_core::enums::LogLevel;
use chrono::{DateTime, Utc};
use clap::Subcommand;

/// Structured logger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LogsCommands {
    /// Buffered entries, oldest first.
    Show {
        #[arg(long)]
        level: Option<LogLevel>,
        /// Entries at or above this level.
        #[arg(long, conflicts_with = "level")]
        min_level: Option<LogLevel>,
        #[arg(long)]
        category: Option<String>,
        /// RFC 3339 timestamp.
        #[arg(long)]
        since: Option<DateTime<Utc>>,
    },
    /// Counts by level and category.
    Stats,
    /// Export the buffer, optionally with the durable error overflow.
    Export {
        #[arg(long)]
        include_critical: bool,
    },
    /// Drop buffered entries and the durable overflow.
    Clear,
}
