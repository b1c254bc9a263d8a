use serde::{Deserialize, Serialize};

/// Main configuration structure for condscan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CondscanConfig {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: String,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Scanner execution settings
    #[serde(default)]
    pub scan: ScanSettings,
}

impl Default for CondscanConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerSettings::default(),
            scan: ScanSettings::default(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    /// Address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_true(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSettings {
    /// `host:port` string suitable for socket address parsing
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Scanner execution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanSettings {
    /// Batches with at least this many units are scanned on the blocking pool
    #[serde(default = "default_blocking_batch_threshold")]
    pub blocking_batch_threshold: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            blocking_batch_threshold: default_blocking_batch_threshold(),
        }
    }
}

// Default value functions
fn default_version() -> String {
    "1.0".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_blocking_batch_threshold() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CondscanConfig = toml::from_str("").unwrap();
        assert_eq!(config, CondscanConfig::default());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_partial_server_section() {
        let config: CondscanConfig = toml::from_str(
            r#"
            [server]
            port = 9100
            cors_enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert!(!config.server.cors_enabled);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.scan.blocking_batch_threshold, 64);
    }

    #[test]
    fn test_roundtrip_pretty_toml() {
        let config = CondscanConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: CondscanConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
