use anyhow::{Context, Result};
use clap::Subcommand;
use condscan_config::ConfigManager;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default config file (~/.condscan/config.toml unless --path is given)
    Init {
        /// Destination path
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show config file path
    Path,

    /// Validate a config file and print the effective settings
    Validate {
        /// Config file to check (defaults to ~/.condscan/config.toml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn handle_config_command(cmd: ConfigCommand) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async {
        match cmd {
            ConfigCommand::Init { path, force } => init_config(path, force).await,
            ConfigCommand::Path => show_config_path(),
            ConfigCommand::Validate { path } => validate_config(path).await,
        }
    })
}

async fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = match path {
        Some(path) => path,
        None => ConfigManager::config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    ConfigManager::init_at(&config_path)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

fn show_config_path() -> Result<()> {
    println!("{}", ConfigManager::config_path()?.display());
    Ok(())
}

async fn validate_config(path: Option<PathBuf>) -> Result<()> {
    let config_path = match path {
        Some(path) => path,
        None => ConfigManager::config_path()?,
    };

    let manager = ConfigManager::load_from(&config_path)
        .await
        .with_context(|| format!("Invalid config at {}", config_path.display()))?;
    let config = manager.config();

    println!("✓ {} is valid", config_path.display());
    println!("  bind address: {}", config.server.bind_address());
    println!("  cors enabled: {}", config.server.cors_enabled);
    println!("  max body bytes: {}", config.server.max_body_bytes);
    println!(
        "  blocking batch threshold: {}",
        config.scan.blocking_batch_threshold
    );
    Ok(())
}
