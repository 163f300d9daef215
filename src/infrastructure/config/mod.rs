//! Layered application configuration.
//!
//! Order: built-in defaults -> optional TOML file -> `AUTOTUNE_*` environment
//! (nested keys separated by `__`, e.g. `AUTOTUNE_SIMULATOR__TICK_INTERVAL_MS`).
//! A `.env` file in the working directory is loaded first if present.

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::{AppError, Result};

pub const ENV_PREFIX: &str = "AUTOTUNE_";

/// Timing and curve parameters of the progress simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Interval between ticks (default: 1500)
    pub tick_interval_ms: u64,

    /// Delay before the run leaves `Initializing` (default: 2000)
    pub init_delay_ms: u64,

    /// Delay between completion and the completion signal (default: 2000)
    pub completion_delay_ms: u64,

    /// Smallest progress increment per tick (default: 0.5)
    pub min_increment: f64,

    /// Largest progress increment per tick (default: 1.5)
    pub max_increment: f64,

    /// Chance that a running tick appends a log line (default: 0.3)
    pub log_probability: f64,

    /// Maximum retained log entries (default: 20)
    pub log_cap: usize,

    /// Lowest reachable loss (default: 0.08)
    pub loss_floor: f64,

    /// Highest reachable accuracy in percent (default: 95)
    pub accuracy_ceiling: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1500,
            init_delay_ms: 2000,
            completion_delay_ms: 2000,
            min_increment: 0.5,
            max_increment: 1.5,
            log_probability: 0.3,
            log_cap: 20,
            loss_floor: 0.08,
            accuracy_ceiling: 95.0,
        }
    }
}

impl SimulatorSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be > 0".to_string());
        }
        if self.min_increment <= 0.0 || self.min_increment > self.max_increment {
            return Err("increments must satisfy 0 < min_increment <= max_increment".to_string());
        }
        if self.max_increment > 100.0 {
            return Err("max_increment must be <= 100".to_string());
        }
        if !(0.0..=1.0).contains(&self.log_probability) {
            return Err("log_probability must be between 0.0 and 1.0".to_string());
        }
        if self.log_cap == 0 {
            return Err("log_cap must be > 0".to_string());
        }
        if !(0.0..2.5).contains(&self.loss_floor) {
            return Err("loss_floor must be in [0.0, 2.5)".to_string());
        }
        if !(0.0..=100.0).contains(&self.accuracy_ceiling) || self.accuracy_ceiling == 0.0 {
            return Err("accuracy_ceiling must be in (0, 100]".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Largest accepted upload (default: 100 MB)
    pub max_file_size_bytes: u64,

    /// Data rows kept in the preview (default: 5)
    pub preview_rows: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 100 * 1024 * 1024,
            preview_rows: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsSettings {
    pub download_delay_ms: u64,
    pub deploy_delay_ms: u64,
    pub hub_url: String,
}

impl Default for ResultsSettings {
    fn default() -> Self {
        Self {
            download_delay_ms: 2000,
            deploy_delay_ms: 3000,
            hub_url: "https://huggingface.co/models".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `EnvFilter` directive for tracing (default: "info")
    pub log_filter: String,
    pub simulator: SimulatorSettings,
    pub upload: UploadSettings,
    pub results: ResultsSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            simulator: SimulatorSettings::default(),
            upload: UploadSettings::default(),
            results: ResultsSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.simulator
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid simulator settings: {}", e)))?;
        if self.upload.preview_rows == 0 {
            return Err(AppError::ConfigError(
                "Invalid upload settings: preview_rows must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct ConfigService;

impl ConfigService {
    /// Providers without the environment layer.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_file {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        figment
    }

    /// Load defaults, the optional file and the environment, then validate.
    pub fn load(config_file: Option<&Path>) -> Result<AppConfig> {
        let _ = dotenvy::dotenv();

        let figment = Self::figment(config_file).merge(Env::prefixed(ENV_PREFIX).split("__"));
        let config: AppConfig = figment.extract()?;
        config.validate()?;

        debug!(
            tick_interval_ms = config.simulator.tick_interval_ms,
            log_cap = config.simulator.log_cap,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulator.tick_interval(), Duration::from_millis(1500));
        assert_eq!(config.simulator.log_cap, 20);
        assert_eq!(config.upload.preview_rows, 5);
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_filter = \"debug\"\n[simulator]\ntick_interval_ms = 500\nlog_cap = 21"
        )
        .unwrap();

        let config: AppConfig = ConfigService::figment(Some(file.path()))
            .extract()
            .unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.simulator.tick_interval_ms, 500);
        assert_eq!(config.simulator.log_cap, 21);
        // untouched keys keep their defaults
        assert_eq!(config.simulator.loss_floor, 0.08);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let missing = Path::new("/nonexistent/autotune.toml");
        let config: AppConfig = ConfigService::figment(Some(missing)).extract().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_simulator_settings() {
        let mut config = AppConfig::default();
        config.simulator.min_increment = 2.0;
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));

        let mut config = AppConfig::default();
        config.simulator.log_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.simulator.log_cap = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "autotune.toml",
                "log_filter = \"warn\"\n[simulator]\ntick_interval_ms = 500\nlog_cap = 21",
            )?;
            jail.set_env("AUTOTUNE_SIMULATOR__TICK_INTERVAL_MS", 750);
            jail.set_env("AUTOTUNE_LOG_FILTER", "debug");

            let config = ConfigService::load(Some(Path::new("autotune.toml"))).unwrap();
            assert_eq!(config.simulator.tick_interval_ms, 750);
            assert_eq!(config.log_filter, "debug");
            // file value survives where the environment is silent
            assert_eq!(config.simulator.log_cap, 21);
            Ok(())
        });
    }

    #[test]
    fn test_dotenv_file_is_loaded() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(".env", "AUTOTUNE_RESULTS__DEPLOY_DELAY_MS=1234")?;

            let config = ConfigService::load(None);
            // dotenvy writes straight into the process environment
            std::env::remove_var("AUTOTUNE_RESULTS__DEPLOY_DELAY_MS");
            assert_eq!(config.unwrap().results.deploy_delay_ms, 1234);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_environment_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AUTOTUNE_SIMULATOR__TICK_INTERVAL_MS", "fast");
            assert!(matches!(ConfigService::load(None), Err(AppError::ConfigError(_))));
            Ok(())
        });

        figment::Jail::expect_with(|jail| {
            jail.set_env("AUTOTUNE_SIMULATOR__LOG_CAP", 0);
            assert!(matches!(ConfigService::load(None), Err(AppError::ConfigError(_))));
            Ok(())
        });
    }
}
