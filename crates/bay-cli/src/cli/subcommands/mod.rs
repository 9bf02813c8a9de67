mod caps;
mod logs;
mod parts;
mod telemetry;

pub use caps::CapsCommands;
pub use logs::LogsCommands;
pub use parts::PartsCommands;
pub use telemetry::TelemetryCommands;
