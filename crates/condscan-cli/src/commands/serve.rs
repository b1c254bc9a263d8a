use anyhow::{Context, Result};
use condscan_config::ConfigManager;
use condscan_server::ScanServerBuilder;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;

/// Flags for `condscan serve`; each `Some` overrides the config file
#[derive(Debug, Default)]
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub no_cors: bool,
}

pub fn run_serve(options: ServeOptions) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async {
        let manager = match &options.config {
            Some(path) => ConfigManager::load_from(path)
                .await
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ConfigManager::load()
                .await
                .context("Failed to load default config")?,
        };
        info!("Using configuration from {}", manager.path().display());

        let server = apply_overrides(ScanServerBuilder::from_config(manager.config()), &options)
            .build()
            .context("Invalid server address")?;

        server.serve().await.context("Server terminated with an error")
    })
}

fn apply_overrides(mut builder: ScanServerBuilder, options: &ServeOptions) -> ScanServerBuilder {
    if let Some(host) = &options.host {
        builder = builder.host(host.clone());
    }
    if let Some(port) = options.port {
        builder = builder.port(port);
    }
    if options.no_cors {
        builder = builder.cors_enabled(false);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let options = ServeOptions {
            host: Some("0.0.0.0".to_string()),
            port: Some(9100),
            ..Default::default()
        };
        let server = apply_overrides(ScanServerBuilder::new(), &options)
            .build()
            .unwrap();
        assert_eq!(server.addr(), "0.0.0.0:9100".parse().unwrap());
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let server = apply_overrides(ScanServerBuilder::new(), &ServeOptions::default())
            .build()
            .unwrap();
        assert_eq!(server.addr(), "127.0.0.1:8000".parse().unwrap());
    }
}
