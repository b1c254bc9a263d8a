pub mod manager;
pub mod types;

pub use manager::{ConfigError, ConfigManager};
pub use types::{CondscanConfig, ScanSettings, ServerSettings};
