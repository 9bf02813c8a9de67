pub mod caps;
pub mod dispatch;
pub mod jobs;
pub mod logs;
pub mod parts;
pub mod telemetry;
pub mod whoami;
