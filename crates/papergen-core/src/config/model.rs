//! Configuration data model

use crate::error::{PaperError, PaperResult};
use crate::prompt::Style;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default generation endpoint (the backend proxy in front of the upstream API)
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/generate";

/// Main configuration for papergen
///
/// All fields support serde(default) so partial configuration files are
/// filled in with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the prompt is posted to
    pub endpoint: String,
    /// Style used when none is given on the command line
    pub default_style: Style,
    /// Connection and streaming time limits
    pub timeouts: TimeoutConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_style: Style::default(),
            timeouts: TimeoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the configuration can be used
    pub fn validate(&self) -> PaperResult<()> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            PaperError::config(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PaperError::config(format!(
                "Endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        self.timeouts.validate()?;
        self.logging.validate()
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> PaperResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PaperError::config(format!("Failed to serialize config: {}", e)))
    }
}

/// Time limits, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Time allowed to establish the connection
    pub connect_secs: u64,
    /// Longest allowed gap between two chunks of the stream
    pub idle_secs: u64,
    /// Longest allowed duration of a whole generation
    pub stream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            idle_secs: 60,
            stream_secs: 300,
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }

    pub fn stream(&self) -> Duration {
        Duration::from_secs(self.stream_secs)
    }

    fn validate(&self) -> PaperResult<()> {
        for (name, value) in [
            ("connect_secs", self.connect_secs),
            ("idle_secs", self.idle_secs),
            ("stream_secs", self.stream_secs),
        ] {
            if value == 0 {
                return Err(PaperError::config(format!(
                    "timeouts.{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> PaperResult<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        const FORMATS: [&str; 3] = ["pretty", "compact", "json"];

        if !LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(PaperError::config(format!(
                "Unknown log level '{}'",
                self.level
            )));
        }
        if !FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(PaperError::config(format!(
                "Unknown log format '{}'",
                self.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeouts.idle(), Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = Config {
            endpoint: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(PaperError::Config(_))));

        let config = Config {
            endpoint: "ftp://example.com/generate".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.timeouts.idle_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("idle_secs"));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = Config::default();
        config.default_style = Style::Diploma;
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("default_style = \"Diploma\""));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
