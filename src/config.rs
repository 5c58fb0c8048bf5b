use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::pricing::params::Parameters;
use crate::refresh::poller::DEFAULT_INTERVAL;

/// Environment variable prefix, e.g. `PRICE_TABLE__SOURCE__URL`
pub const ENV_PREFIX: &str = "PRICE_TABLE";

pub const DEFAULT_SOURCE_URL: &str = "http://localhost:4000/dummy-data";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub refresh: RefreshConfig,
    pub defaults: ParameterDefaults,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_ms: u64,
    /// Re-apply the active sort after every refresh instead of showing
    /// source order
    pub sticky_sort: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            sticky_sort: false,
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Initial form values, kept as text and coerced like typed input
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParameterDefaults {
    pub num_requests: String,
    pub response_size: String,
    pub frequency: String,
}

impl Default for ParameterDefaults {
    fn default() -> Self {
        Self {
            num_requests: "0".to_string(),
            response_size: "0".to_string(),
            frequency: "0".to_string(),
        }
    }
}

impl ParameterDefaults {
    pub fn to_parameters(&self) -> Parameters {
        Parameters::new(&self.num_requests, &self.response_size, &self.frequency)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    pub format: LogFormat,
    /// Where the interactive dashboard writes its log file
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            directory: "logs".to_string(),
        }
    }
}

/// Load configuration: defaults, then the optional file, then environment
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = settings.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(&cfg.source.url).map_err(|e| {
        ConfigError::Invalid(format!("source.url '{}' is not a valid URL: {}", cfg.source.url, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!(
            "source.url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if cfg.source.timeout_seconds == 0 {
        return Err(ConfigError::Invalid(
            "source.timeout_seconds must be at least 1".to_string(),
        ));
    }

    if !(100..=3_600_000).contains(&cfg.refresh.interval_ms) {
        return Err(ConfigError::Invalid(format!(
            "refresh.interval_ms must be between 100 and 3600000, got {}",
            cfg.refresh.interval_ms
        )));
    }

    if cfg.display.currency_symbol.is_empty() {
        return Err(ConfigError::Invalid(
            "display.currency_symbol cannot be empty".to_string(),
        ));
    }

    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&cfg.logging.level) {
        return Err(ConfigError::Invalid(format!(
            "logging.level '{}' is not a valid filter: {}",
            cfg.logging.level, e
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(cfg.refresh.interval(), Duration::from_millis(5000));
        assert_eq!(cfg.defaults.to_parameters(), Parameters::default());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut cfg = Config::default();
        cfg.source.url = "not a url".to_string();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("source.url"));

        cfg.source.url = "ftp://example.com/zones".to_string();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_validate_interval_range() {
        let mut cfg = Config::default();
        cfg.refresh.interval_ms = 50;
        assert!(validate_config(&cfg).is_err());

        cfg.refresh.interval_ms = 100;
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_currency() {
        let mut cfg = Config::default();
        cfg.display.currency_symbol.clear();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.source.timeout_seconds, 10);
        assert_eq!(cfg.display.currency_symbol, "$");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[source]
url = "http://127.0.0.1:9000/zones"

[refresh]
interval_ms = 2000
sticky_sort = true

[defaults]
response_size = "2"
frequency = 30

[logging]
format = "json"
"#
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.source.url, "http://127.0.0.1:9000/zones");
        assert_eq!(cfg.source.timeout_seconds, 10);
        assert_eq!(cfg.refresh.interval_ms, 2000);
        assert!(cfg.refresh.sticky_sort);
        assert_eq!(cfg.logging.format, LogFormat::Json);

        let params = cfg.defaults.to_parameters();
        assert_eq!(params.response_size(), 2.0);
        assert_eq!(params.frequency(), 30.0);
        assert_eq!(params.num_requests(), 0.0);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[refresh]\ninterval_ms = 10").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
