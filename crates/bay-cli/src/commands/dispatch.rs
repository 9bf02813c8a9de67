use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Jobs(args) => commands::jobs::handle_list(&args, ctx, flags).await,
        Commands::Job(args) => commands::jobs::handle_get(&args, ctx, flags).await,
        Commands::Vendor(args) => commands::jobs::handle_vendor(&args, ctx, flags).await,
        Commands::Parts { action } => commands::parts::handle(&action, ctx, flags).await,
        Commands::Whoami => commands::whoami::handle(ctx, flags).await,
        Commands::Caps { action } => commands::caps::handle(&action, ctx, flags),
        Commands::Telemetry { action } => commands::telemetry::handle(&action, ctx, flags),
        Commands::Logs { action } => commands::logs::handle(&action, ctx, flags),
    }
}
