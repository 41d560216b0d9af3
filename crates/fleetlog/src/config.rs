//! Configuration management for fleetlog.
//!
//! Configuration is layered with figment: built-in defaults, then a TOML
//! file, then `FLEETLOG_` environment variables.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::report::Period;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name used under the platform config and data directories.
const APP_DIR_NAME: &str = "fleetlog";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "fleet.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "FLEETLOG_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLEETLOG_`, sections separated
///    by `__`, e.g. `FLEETLOG_DISPLAY__CURRENCY=EUR`)
/// 2. TOML config file at `~/.config/fleetlog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Output formatting.
    pub display: DisplayConfig,
    /// Dashboard configuration.
    pub dashboard: DashboardConfig,
    /// Report defaults.
    pub report: ReportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/fleetlog/fleet.db`
    pub database_path: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency label printed after amounts.
    pub currency: String,
    /// `strftime`-style format for dates.
    pub date_format: String,
    /// Width of the report bar chart, in characters.
    pub chart_width: usize,
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How many recent interventions to list.
    pub recent_interventions: usize,
}

/// Report configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Period used when `report` is run without `--period`.
    pub default_period: Period,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "FCFA".to_string(),
            date_format: "%d %b %Y".to_string(),
            chart_width: 40,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_interventions: 3,
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML file at
    /// `config_path` or at [`Config::default_config_path`].
    ///
    /// Top-level TOML tables map onto the config sections. A missing file
    /// is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a single TOML file over the defaults, ignoring the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or
    /// holds invalid values.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigValidation {
                message: format!("config file not found: {}", path.display()),
            });
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.display.currency.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "display.currency must not be empty".to_string(),
            });
        }

        if self.display.date_format.trim().is_empty()
            || StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::ConfigValidation {
                message: format!(
                    "display.date_format is not a valid date format: {:?}",
                    self.display.date_format
                ),
            });
        }

        if self.display.chart_width == 0 {
            return Err(Error::ConfigValidation {
                message: "display.chart_width must be greater than 0".to_string(),
            });
        }

        if self.dashboard.recent_interventions == 0 {
            return Err(Error::ConfigValidation {
                message: "dashboard.recent_interventions must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.display.currency, "FCFA");
        assert_eq!(config.display.date_format, "%d %b %Y");
        assert_eq!(config.display.chart_width, 40);
        assert_eq!(config.dashboard.recent_interventions, 3);
        assert_eq!(config.report.default_period, Period::All);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_currency() {
        let mut config = Config::default();
        config.display.currency = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("currency"));
    }

    #[test]
    fn test_validate_bad_date_format() {
        let mut config = Config::default();
        config.display.date_format = "%Q-%".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("date_format"));
    }

    #[test]
    fn test_validate_zero_chart_width() {
        let mut config = Config::default();
        config.display.chart_width = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("chart_width"));
    }

    #[test]
    fn test_validate_zero_recent() {
        let mut config = Config::default();
        config.dashboard.recent_interventions = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("recent_interventions"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.ends_with("fleetlog/fleet.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/fleet.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/fleet.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.ends_with("fleetlog/config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.dashboard, DashboardConfig::default());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let file = write_config(
            r#"
[storage]
database_path = "/srv/fleet/fleet.db"

[display]
currency = "XOF"

[dashboard]
recent_interventions = 5
"#,
        );

        let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/srv/fleet/fleet.db"));
        assert_eq!(config.display.currency, "XOF");
        assert_eq!(config.display.chart_width, 40);
        assert_eq!(config.dashboard.recent_interventions, 5);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let file = write_config("[display]\nchart_width = 0\n");
        assert!(matches!(
            Config::load_from(Some(file.path().to_path_buf())),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let file = write_config(
            r#"
[display]
currency = "EUR"
chart_width = 20

[report]
default_period = "quarter"
"#,
        );

        let config = Config::load_file(file.path()).unwrap();
        assert_eq!(config.display.currency, "EUR");
        assert_eq!(config.display.chart_width, 20);
        assert_eq!(config.display.date_format, "%d %b %Y");
        assert_eq!(config.report.default_period, Period::Quarter);
    }

    #[test]
    fn test_load_file_rejects_invalid_values() {
        let file = write_config("[dashboard]\nrecent_interventions = 0\n");
        assert!(matches!(
            Config::load_file(file.path()),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_load_file_rejects_unknown_period() {
        let file = write_config("[report]\ndefault_period = \"fortnight\"\n");
        assert!(matches!(
            Config::load_file(file.path()),
            Err(Error::ConfigLoad(_))
        ));
    }

    #[test]
    fn test_load_file_missing() {
        let err = Config::load_file(Path::new("/nonexistent/fleetlog.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"currency\":\"FCFA\""));
        assert!(json.contains("\"default_period\":\"all\""));
    }

    #[test]
    fn test_display_config_deserialize_partial() {
        let display: DisplayConfig = serde_json::from_str(r#"{"currency": "USD"}"#).unwrap();
        assert_eq!(display.currency, "USD");
        assert_eq!(display.chart_width, 40);
    }
}
