use bay_session::LogFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bayline logs`.
pub fn handle(action: &LogsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let logger = ctx.diagnostics.logger();
    match action {
        LogsCommands::Show {
            level,
            min_level,
            category,
            since,
        } => {
            let filter = LogFilter {
                level: *level,
                min_level: *min_level,
                category: category.clone(),
                since: *since,
            };
            output(&logger.get_logs(&filter), flags.format)
        }
        LogsCommands::Stats => output(&logger.stats(), flags.format),
        LogsCommands::Export { include_critical } => {
            output(&logger.export(*include_critical), flags.format)
        }
        LogsCommands::Clear => {
            logger.clear();
            logger.clear_durable();
            output(&logger.stats(), flags.format)
        }
    }
}
