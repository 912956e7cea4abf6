//! Application configuration module
//!
//! This module provides type-safe configuration loading from an optional
//! config file and environment variables using the `config` and `dotenvy`
//! crates. Environment variables use the `MCDA_ENGINE` prefix and nested
//! values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use mcda_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("CR threshold {}", config.scoring.consistency_threshold);
//! ```

mod error;
mod logging;
mod scoring;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use scoring::ScoringConfig;

use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_ENV: &str = "MCDA_ENGINE_CONFIG";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads the optional file named by
/// `MCDA_ENGINE_CONFIG` and then environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scoring thresholds and defaults
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the file named by `MCDA_ENGINE_CONFIG`, if set
    /// 3. Reads environment variables with `MCDA_ENGINE` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MCDA_ENGINE__SCORING__CONSISTENCY_THRESHOLD=0.08` -> `scoring.consistency_threshold = 0.08`
    /// - `MCDA_ENGINE__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(file.as_deref().map(Path::new))
    }

    /// Load configuration from an explicit file (if any) plus environment variables
    ///
    /// The file format is inferred from its extension (toml, json, yaml, ...).
    /// Environment variables take precedence over file values.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("MCDA_ENGINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("MCDA_ENGINE__SCORING__CONSISTENCY_THRESHOLD");
        env::remove_var("MCDA_ENGINE__SCORING__NORMALIZE_SAW_WEIGHTS");
        env::remove_var("MCDA_ENGINE__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_defaults_without_sources() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load_from(None);

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MCDA_ENGINE__SCORING__CONSISTENCY_THRESHOLD", "0.08");
        env::set_var("MCDA_ENGINE__SCORING__NORMALIZE_SAW_WEIGHTS", "true");
        env::set_var("MCDA_ENGINE__LOGGING__FORMAT", "json");
        let result = AppConfig::load_from(None);
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.scoring.consistency_threshold, 0.08);
        assert!(config.scoring.normalize_saw_weights);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[scoring]\ndefault_core_weight = 0.7\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.scoring.default_core_weight, 0.7);
        assert_eq!(config.scoring.consistency_threshold, 0.1);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[scoring]\nconsistency_threshold = 0.2").unwrap();

        env::set_var("MCDA_ENGINE__SCORING__CONSISTENCY_THRESHOLD", "0.05");
        let result = AppConfig::load_from(Some(file.path()));
        clear_env();

        assert_eq!(result.unwrap().scoring.consistency_threshold, 0.05);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/mcda.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
