//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use stats_core::math::NormalMethod;

/// Largest number of fractional digits that is meaningful for an `f64`.
pub const MAX_PRECISION: usize = 17;

/// Largest grid accepted by the `table` command.
pub const MAX_TABLE_ROWS: usize = 100_000;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error(transparent)]
    InvalidMethod(#[from] stats_core::math::ParseMethodError),

    #[error("Invalid precision: {0}. Must be at most 17")]
    InvalidPrecision(usize),

    #[error("Invalid table range: from = {from}, to = {to}, step = {step}")]
    InvalidRange { from: f64, to: f64, step: f64 },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Grid used by the `table` command
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableRange {
    pub from: f64,
    pub to: f64,
    pub step: f64,
}

impl Default for TableRange {
    fn default() -> Self {
        Self {
            from: -3.0,
            to: 3.0,
            step: 0.5,
        }
    }
}

impl TableRange {
    /// Number of grid points, or `None` above [`MAX_TABLE_ROWS`].
    pub fn row_count(&self) -> Option<usize> {
        let intervals = ((self.to - self.from) / self.step + 1e-9).floor();
        if intervals.is_nan() || intervals >= MAX_TABLE_ROWS as f64 {
            return None;
        }
        (intervals.max(0.0) as usize).checked_add(1)
    }

    /// Grid points from `from` to `to` inclusive.
    ///
    /// Points are generated by index to avoid accumulating step error.
    /// Oversized grids yield no points; call [`TableRange::validate`] first.
    pub fn points(&self) -> Vec<f64> {
        let count = self.row_count().unwrap_or(0);
        (0..count)
            .map(|i| self.from + i as f64 * self.step)
            .collect()
    }

    /// Checks that the grid is finite, ascending, has a positive step and
    /// at most [`MAX_TABLE_ROWS`] points.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let TableRange { from, to, step } = *self;
        let well_formed =
            step.is_finite() && step > 0.0 && from.is_finite() && to.is_finite() && from < to;
        if !well_formed || self.row_count().is_none() {
            return Err(ConfigError::InvalidRange { from, to, step });
        }
        Ok(())
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,
    /// CDF approximation
    pub method: NormalMethod,
    /// Output format
    pub format: OutputFormat,
    /// Fractional digits printed for table and csv output
    pub precision: usize,
    /// Default grid for the `table` command
    pub table: TableRange,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            method: NormalMethod::Series,
            format: OutputFormat::Table,
            precision: 7,
            table: TableRange::default(),
        }
    }
}

/// Environment variable names
pub const ENV_LOG_LEVEL: &str = "NORMSTAT_LOG_LEVEL";
pub const ENV_METHOD: &str = "NORMSTAT_METHOD";
pub const ENV_FORMAT: &str = "NORMSTAT_FORMAT";
pub const ENV_PRECISION: &str = "NORMSTAT_PRECISION";

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to resolve variables
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(method) = lookup(ENV_METHOD) {
            self.method = NormalMethod::from_str(&method)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = OutputFormat::from_str(&format)?;
        }
        if let Some(precision) = lookup(ENV_PRECISION) {
            self.precision = precision.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("{} is not an integer: {}", ENV_PRECISION, precision))
            })?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }

        self.table.validate()
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(method) = &cli.method {
            self.method = NormalMethod::from_str(method)?;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(precision) = cli.precision {
            self.precision = precision;
        }
        Ok(())
    }
}

/// Global CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Method override
    pub method: Option<String>,
    /// Output format override
    pub format: Option<String>,
    /// Precision override
    pub precision: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.method, NormalMethod::Series);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.precision, 7);
        assert_eq!(config.table, TableRange::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_table_points() {
        let range = TableRange::default();
        let points = range.points();
        assert_eq!(points.len(), 13);
        assert_eq!(points[0], -3.0);
        assert_eq!(points[6], 0.0);
        assert_eq!(points[12], 3.0);
    }

    #[test]
    fn test_table_points_inexact_step() {
        let range = TableRange {
            from: 0.0,
            to: 1.0,
            step: 0.1,
        };
        assert_eq!(range.points().len(), 11);
    }

    #[test]
    fn test_validate_precision() {
        let mut config = CliConfig::default();
        config.precision = 18;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrecision(18))
        ));

        config.precision = MAX_PRECISION;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_range() {
        let mut config = CliConfig::default();
        config.table.step = 0.0;
        assert!(config.validate().is_err());

        config.table = TableRange {
            from: 2.0,
            to: -2.0,
            step: 0.5,
        };
        assert!(config.validate().is_err());

        config.table.to = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let dense = TableRange {
            from: -1e6,
            to: 1e6,
            step: 1e-12,
        };
        assert!(matches!(
            dense.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert_eq!(dense.row_count(), None);
        assert!(dense.points().is_empty());

        let huge_span = TableRange {
            from: -1e300,
            to: 1e300,
            step: 1.0,
        };
        assert!(huge_span.validate().is_err());
        assert!(huge_span.points().is_empty());

        let overflowing = TableRange {
            from: -f64::MAX,
            to: f64::MAX,
            step: 1.0,
        };
        assert!(overflowing.validate().is_err());
    }

    #[test]
    fn test_validate_row_limit_boundary() {
        let at_limit = TableRange {
            from: 0.0,
            to: (MAX_TABLE_ROWS - 1) as f64,
            step: 1.0,
        };
        assert_eq!(at_limit.row_count(), Some(MAX_TABLE_ROWS));
        assert!(at_limit.validate().is_ok());

        let over_limit = TableRange {
            to: MAX_TABLE_ROWS as f64,
            ..at_limit
        };
        assert_eq!(over_limit.row_count(), None);
        assert!(over_limit.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_LOG_LEVEL, "debug"),
            (ENV_METHOD, "rational"),
            (ENV_FORMAT, "csv"),
            (ENV_PRECISION, "4"),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        config
            .apply_env_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.method, NormalMethod::Rational);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.precision, 4);
    }

    #[test]
    fn test_env_invalid_precision() {
        let mut config = CliConfig::default();
        let result =
            config.apply_env_with(|key| (key == ENV_PRECISION).then(|| "many".to_string()));
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_env_invalid_method() {
        let mut config = CliConfig::default();
        let result =
            config.apply_env_with(|key| (key == ENV_METHOD).then(|| "taylor".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidMethod(_))));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = CliConfig::default();
        let cli = CliArgs {
            log_level: Some("warn".to_string()),
            method: Some("rational".to_string()),
            format: Some("json".to_string()),
            precision: Some(3),
            config_file: None,
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.method, NormalMethod::Rational);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.precision, 3);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            method = "rational"
            format = "json"
            precision = 10

            [table]
            from = -1.0
            to = 1.0
            step = 0.25
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.method, NormalMethod::Rational);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.precision, 10);
        assert_eq!(config.table.points().len(), 9);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            precision = 4

            [table]
            step = 1.0
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.precision, 4);
        assert_eq!(config.method, NormalMethod::Series);
        assert_eq!(config.table.from, -3.0);
        assert_eq!(config.table.step, 1.0);
    }

    #[test]
    fn test_build_config_priority() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "method = \"rational\"\nformat = \"csv\"\nprecision = 5").unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            precision: Some(9),
            ..Default::default()
        };
        let config =
            build_config_with(&cli, |key| (key == ENV_FORMAT).then(|| "json".to_string()))
                .unwrap();

        // file
        assert_eq!(config.method, NormalMethod::Rational);
        // env beats file
        assert_eq!(config.format, OutputFormat::Json);
        // cli beats file
        assert_eq!(config.precision, 9);
    }

    #[test]
    fn test_build_config_cli_beats_env() {
        let env: HashMap<&str, &str> = [
            (ENV_LOG_LEVEL, "debug"),
            (ENV_METHOD, "rational"),
            (ENV_FORMAT, "json"),
            (ENV_PRECISION, "4"),
        ]
        .into_iter()
        .collect();

        let cli = CliArgs {
            log_level: Some("error".to_string()),
            method: Some("series".to_string()),
            format: Some("csv".to_string()),
            precision: Some(12),
            config_file: None,
        };
        let config = build_config_with(&cli, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.method, NormalMethod::Series);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.precision, 12);
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with(&CliArgs::default(), no_env).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/normstat.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with(&cli, no_env),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));

        let err = ConfigError::InvalidFormat("xml".to_string());
        assert!(err.to_string().contains("Invalid output format"));

        let err = ConfigError::InvalidPrecision(40);
        assert!(err.to_string().contains("at most 17"));
    }
}
