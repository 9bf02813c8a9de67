//! Flags shared by every `bayline` subcommand.

use clap::ValueEnum;
use serde::Serialize;

/// How command results are printed. Both forms are JSON.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Indented, for reading at a terminal.
    #[default]
    Pretty,
    /// A single line, for piping into other tools.
    Compact,
}

impl OutputFormat {
    pub fn render<T: Serialize>(self, value: &T) -> serde_json::Result<String> {
        match self {
            Self::Pretty => serde_json::to_string_pretty(value),
            Self::Compact => serde_json::to_string(value),
        }
    }
}

/// Output and verbosity settings resolved from the command line.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}

impl GlobalFlags {
    /// Tracing filter used when `BAYLINE_LOG` is unset. `--quiet` wins.
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug,hyper=info,reqwest=info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(quiet: bool, verbose: bool) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::default(),
            quiet,
            verbose,
        }
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(flags(true, true).default_log_filter(), "error");
        assert_eq!(flags(false, false).default_log_filter(), "warn");
        assert!(flags(false, true).default_log_filter().starts_with("debug"));
    }

    #[test]
    fn default_format_is_pretty() {
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
    }
}
