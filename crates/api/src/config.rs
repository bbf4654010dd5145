//! Service configuration
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! `RISK_`-prefixed environment variables (`RISK_SERVER__ADDR=...`).

use crate::rate_limit::RateLimitConfig;
use applicant_validator::ValidationConfig;
use risk_assessment::ArtifactPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file, used when no path is given and it exists
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactPaths,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Load configuration from an optional TOML file and the environment
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("RISK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.logging.level, "info");
        assert!(!config.rate_limit.enabled);
        assert_eq!(config.validation.age_range, (18, 100));
        assert_eq!(
            config.artifacts.model,
            PathBuf::from("models/ensemble_model.json")
        );
    }

    #[test]
    fn test_load_from_file() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.validation.duration_range, (1, 60));
        assert_eq!(
            config.artifacts.encoders,
            PathBuf::from("models/label_encoders.json")
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = PathBuf::from("does/not/exist.toml");
        assert!(load_config(Some(&path)).is_err());
    }
}
