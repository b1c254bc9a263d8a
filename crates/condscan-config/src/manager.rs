use crate::types::CondscanConfig;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Manager for condscan configuration
///
/// Manages the configuration stored in ~/.condscan/config.toml, or at an
/// explicit path given on the command line.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    config: CondscanConfig,
}

impl ConfigManager {
    /// Get the default config path (~/.condscan/config.toml)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".condscan").join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults when absent
    pub async fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        if !tokio::fs::try_exists(&config_path).await? {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self {
                config_path,
                config: CondscanConfig::default(),
            });
        }
        Self::load_from(&config_path).await
    }

    /// Load config from specific path
    ///
    /// Unlike [`ConfigManager::load`], a missing file is an error here.
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let config: CondscanConfig = toml::from_str(&contents)?;
        validate(&config)?;
        debug!("Loaded config from {}", path.display());

        Ok(Self {
            config_path: path.to_path_buf(),
            config,
        })
    }

    /// Initialize config at specific path with default values
    pub async fn init_at(path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let manager = Self {
            config_path: path.to_path_buf(),
            config: CondscanConfig::default(),
        };
        manager.save().await?;

        Ok(manager)
    }

    /// Save config to disk atomically
    ///
    /// Uses a temporary file and atomic rename to prevent corruption
    pub async fn save(&self) -> Result<(), ConfigError> {
        validate(&self.config)?;
        let toml_str = toml::to_string_pretty(&self.config)?;

        let temp_path = self.config_path.with_extension("toml.tmp");
        tokio::fs::write(&temp_path, toml_str).await?;
        tokio::fs::rename(&temp_path, &self.config_path).await?;

        Ok(())
    }

    /// Get reference to config
    pub fn config(&self) -> &CondscanConfig {
        &self.config
    }

    /// Get mutable reference to config (caller must call save())
    pub fn config_mut(&mut self) -> &mut CondscanConfig {
        &mut self.config
    }

    /// Path this config was loaded from or will be saved to
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

fn validate(config: &CondscanConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid("server.port must not be 0".to_string()));
    }
    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::Invalid(
            "server.max_body_bytes must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
