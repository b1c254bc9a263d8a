//! Subcommand implementations

mod config;
mod scan;
mod serve;

pub use config::{handle_config_command, ConfigCommand};
pub use scan::run_scan;
pub use serve::{run_serve, ServeOptions};
