//! Configuration loading utilities

use crate::Config;
use brandcast_common::{BrandcastError, Result as BrandcastResult};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "BRANDCAST_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for BrandcastError {
    fn from(err: ConfigError) -> Self {
        BrandcastError::config_with_source(err.to_string(), err)
    }
}

fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |var| env::var(var).ok())
    }

    /// Like [`ConfigLoader::load_config`] with an explicit variable lookup.
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Built-in defaults plus environment overrides.
    pub fn load_defaults_with<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from `BRANDCAST_CONFIG_PATH`, then `brandcast.yaml`
    /// or `brandcast.yml` in the working directory, else defaults.
    pub fn load() -> BrandcastResult<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new("brandcast.yaml").exists() {
            Self::load_config("brandcast.yaml")?
        } else if Path::new("brandcast.yml").exists() {
            Self::load_config("brandcast.yml")?
        } else {
            info!("No configuration file found, using defaults");
            Self::load_defaults_with(|var| env::var(var).ok())?
        };

        Ok(config)
    }

    /// Apply `BRANDCAST_*` overrides resolved through `lookup`.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("BRANDCAST_ARTIFACT_DIR") {
            config.artifacts.dir = dir.into();
        }

        if let Some(file) = lookup("BRANDCAST_DATASET_FILE") {
            config.artifacts.dataset_file = file;
        }

        if let Some(brands) = lookup("BRANDCAST_BRANDS") {
            config.brands = brands
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(days) = lookup("BRANDCAST_LOOKBACK_DAYS") {
            config.forecast.lookback_days = parse_env("BRANDCAST_LOOKBACK_DAYS", &days)?;
        }

        if let Some(addr) = lookup("BRANDCAST_BIND_ADDR") {
            config.web.bind_addr = addr;
        }

        if let Some(level) = lookup("BRANDCAST_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("BRANDCAST_LOG_FILE") {
            config.logging.file_path = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_load_valid_yaml_config() {
        let yaml = "brands: [Nike, Apple]\nartifacts:\n  dir: /srv/models\nforecast:\n  lookback_days: 7\nchart:\n  window: 30\n  primary_color: \"#112233\"\nweb:\n  bind_addr: \"0.0.0.0:8080\"\n";
        let file = create_test_config_file(yaml);
        let config = ConfigLoader::load_config_with(file.path(), no_env).unwrap();

        assert_eq!(config.brands, vec!["Nike", "Apple"]);
        assert_eq!(config.artifacts.dir, std::path::PathBuf::from("/srv/models"));
        assert_eq!(config.forecast.lookback_days, 7);
        assert_eq!(config.chart.window, 30);
        assert_eq!(config.chart.primary_color, "#112233");
        assert_eq!(config.web.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let file = create_test_config_file("brands: [Google]\n");
        let config = ConfigLoader::load_config_with(file.path(), no_env).unwrap();

        assert_eq!(config.brands, vec!["Google"]);
        assert_eq!(config.forecast.lookback_days, 14);
        assert_eq!(config.analytics.sentiment_window, 100);
        assert_eq!(config.artifacts.model_pattern, "{brand}_model.safetensors");
    }

    #[test]
    fn test_invalid_yaml() {
        let file = create_test_config_file("brands: [unclosed");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let file = create_test_config_file("chart:\n  primary_color: blue\n");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_empty_brand_list_rejected() {
        let file = create_test_config_file("brands: []\n");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let file = create_test_config_file("brands: [Nike]\n");
        let lookup = env_from(&[
            ("BRANDCAST_BRANDS", "Apple, Adidas,,"),
            ("BRANDCAST_ARTIFACT_DIR", "/data"),
            ("BRANDCAST_LOOKBACK_DAYS", "21"),
            ("BRANDCAST_BIND_ADDR", "0.0.0.0:9000"),
            ("BRANDCAST_LOG_LEVEL", "debug"),
            ("BRANDCAST_LOG_FILE", "/tmp/brandcast.log"),
            ("BRANDCAST_DATASET_FILE", "events.csv"),
        ]);
        let config = ConfigLoader::load_config_with(file.path(), lookup).unwrap();

        assert_eq!(config.brands, vec!["Apple", "Adidas"]);
        assert_eq!(config.artifacts.dir, std::path::PathBuf::from("/data"));
        assert_eq!(config.artifacts.dataset_path(), std::path::PathBuf::from("/data/events.csv"));
        assert_eq!(config.forecast.lookback_days, 21);
        assert_eq!(config.web.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_path.as_deref(), Some("/tmp/brandcast.log"));
    }

    #[test]
    fn test_env_parse_error() {
        let lookup = env_from(&[("BRANDCAST_LOOKBACK_DAYS", "two weeks")]);
        let result = ConfigLoader::load_defaults_with(lookup);
        match result.unwrap_err() {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "BRANDCAST_LOOKBACK_DAYS"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config_with("/nonexistent/path/brandcast.yaml", no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_config_error_converts_to_brandcast_error() {
        let err: BrandcastError = ConfigError::IoError(std::io::Error::other("gone")).into();
        assert!(matches!(err, BrandcastError::Config { .. }));
    }
}
