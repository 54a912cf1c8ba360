//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML file
//! (`megahr.toml`, or the path in `MEGAHR_CONFIG`), then `MEGAHR_*` environment
//! variables. A `.env` file is loaded into the environment first.

use std::net::SocketAddr;
use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors abort startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where the process is running; only affects log verbosity and error detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub environment: RunEnvironment,
    pub jwt_secret: String,
    pub jwt_expires_in_secs: i64,
    /// 64 hex characters (a 32-byte AES-256 key)
    pub encryption_key: String,
    pub upload_dir: PathBuf,
    pub bcrypt_cost: u32,
    pub log_filter: String,
    pub slow_request_ms: u64,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_redirect_uri: Option<String>,
    pub outlook_client_id: Option<String>,
    pub outlook_client_secret: Option<String>,
    pub outlook_redirect_uri: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: RunEnvironment::Development,
            jwt_secret: String::new(),
            jwt_expires_in_secs: 86_400,
            encryption_key: String::new(),
            upload_dir: PathBuf::from("uploads"),
            bcrypt_cost: 10,
            log_filter: "info".to_string(),
            slow_request_ms: 100,
            google_client_id: None,
            google_client_secret: None,
            google_redirect_uri: None,
            outlook_client_id: None,
            outlook_client_secret: None,
            outlook_redirect_uri: None,
        }
    }
}

impl ApiConfig {
    pub const ENV_PREFIX: &'static str = "MEGAHR";
    pub const DEFAULT_FILE: &'static str = "megahr.toml";

    /// Load and validate configuration from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let file = std::env::var("MEGAHR_CONFIG").unwrap_or_else(|_| Self::DEFAULT_FILE.into());
        let defaults = Self::default();

        let config: ApiConfig = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("environment", "development")?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expires_in_secs", defaults.jwt_expires_in_secs)?
            .set_default("encryption_key", defaults.encryption_key)?
            .set_default("upload_dir", defaults.upload_dir.to_string_lossy().into_owned())?
            .set_default("bcrypt_cost", i64::from(defaults.bcrypt_cost))?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("slow_request_ms", defaults.slow_request_ms)?
            .add_source(File::with_name(&file).required(false))
            .add_source(Environment::with_prefix(Self::ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("jwt_secret must be set".into()));
        }
        if self.jwt_expires_in_secs <= 0 {
            return Err(ConfigError::Invalid(
                "jwt_expires_in_secs must be positive".into(),
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "bcrypt_cost must be between 4 and 31".into(),
            ));
        }
        self.encryption_key_bytes()?;
        Ok(())
    }

    /// Decode the AES-256 key
    pub fn encryption_key_bytes(&self) -> Result<[u8; 32], ConfigError> {
        let invalid = || {
            ConfigError::Invalid(
                "encryption_key must be exactly 64 hex characters (32 bytes)".into(),
            )
        };
        if self.encryption_key.len() != 64 {
            return Err(invalid());
        }
        let bytes = hex::decode(&self.encryption_key).map_err(|_| invalid())?;
        bytes.try_into().map_err(|_| invalid())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad listen address: {e}")))
    }

    pub fn is_production(&self) -> bool {
        self.environment == RunEnvironment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ApiConfig {
        ApiConfig {
            jwt_secret: "secret".into(),
            encryption_key: "ab".repeat(32),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
        assert_eq!(valid().encryption_key_bytes().unwrap(), [0xab; 32]);
    }

    #[test]
    fn test_missing_jwt_secret_is_rejected() {
        let config = ApiConfig {
            jwt_secret: "  ".into(),
            ..valid()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_encryption_key_must_be_64_hex_chars() {
        for key in ["abcd".to_string(), "zz".repeat(32), "ab".repeat(33)] {
            let config = ApiConfig {
                encryption_key: key,
                ..valid()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_bcrypt_cost_range() {
        let config = ApiConfig {
            bcrypt_cost: 3,
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        assert_eq!(valid().socket_addr().unwrap().port(), 5000);
    }
}
