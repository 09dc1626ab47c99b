use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;

/// Main configuration structure for Sable DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolution session configuration
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sable-dns.toml in current directory
    /// 3. /etc/sable-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("sable-dns.toml").exists() {
            Self::from_file("sable-dns.toml")?
        } else if std::path::Path::new("/etc/sable-dns/config.toml").exists() {
            Self::from_file("/etc/sable-dns/config.toml")?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.transports.is_empty() {
            return Err(ConfigError::Validation(
                "Transport list cannot be empty".to_string(),
            ));
        }

        for upstream in &self.resolver.upstreams {
            if upstream.port == 0 {
                return Err(ConfigError::Validation(format!(
                    "Upstream {} has port 0",
                    upstream.address
                )));
            }
            if let Some(hostname) = &upstream.tls_auth_name {
                if hostname.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "Upstream {} has an empty TLS auth name",
                        upstream.address
                    )));
                }
            }
        }

        Ok(())
    }
}
