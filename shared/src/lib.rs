pub mod logging;
pub mod telemetry;
pub mod types;
