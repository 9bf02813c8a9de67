use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `bayline` binary.
#[derive(Debug, Parser)]
#[command(
    name = "bayline",
    version,
    about = "Bayline - resilient service-job data access"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: pretty, compact
    #[arg(short, long, global = true, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use bay_core::enums::{Capability, LogLevel};
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{CapsCommands, LogsCommands, PartsCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["bayline", "--format", "compact", "whoami", "--verbose"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Compact);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["bayline", "--format", "xml", "whoami"]).is_err());
    }

    #[test]
    fn jobs_accepts_status_and_limit() {
        let cli = Cli::try_parse_from(["bayline", "jobs", "--status", "open", "--limit", "5"])
            .expect("cli should parse");
        let Commands::Jobs(args) = cli.command else {
            panic!("expected jobs");
        };
        assert_eq!(args.status.as_deref(), Some("open"));
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn parts_add_requires_file() {
        assert!(Cli::try_parse_from(["bayline", "parts", "add", "j1"]).is_err());

        let cli = Cli::try_parse_from(["bayline", "parts", "add", "j1", "--file", "items.json"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Parts {
                action: PartsCommands::Add { ref job_id, .. }
            } if job_id == "j1"
        ));
    }

    #[test]
    fn caps_reset_parses_capability_name() {
        let cli = Cli::try_parse_from(["bayline", "caps", "reset", "jobPartsVendorRel"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Caps {
                action: CapsCommands::Reset {
                    capability: Some(Capability::JobPartsVendorRel)
                }
            }
        ));

        assert!(Cli::try_parse_from(["bayline", "caps", "reset", "bogus"]).is_err());
    }

    #[test]
    fn logs_show_parses_filters() {
        let cli = Cli::try_parse_from([
            "bayline",
            "logs",
            "show",
            "--min-level",
            "WARN",
            "--category",
            "capability",
            "--since",
            "2026-01-01T00:00:00Z",
        ])
        .expect("cli should parse");
        let Commands::Logs {
            action:
                LogsCommands::Show {
                    min_level,
                    category,
                    since,
                    ..
                },
        } = cli.command
        else {
            panic!("expected logs show");
        };
        assert_eq!(min_level, Some(LogLevel::Warn));
        assert_eq!(category.as_deref(), Some("capability"));
        assert!(since.is_some());
    }

    #[test]
    fn logs_show_level_conflicts_with_min_level() {
        let parsed = Cli::try_parse_from([
            "bayline",
            "logs",
            "show",
            "--level",
            "warn",
            "--min-level",
            "error",
        ]);
        assert!(parsed.is_err());
    }
}
