//! Layered configuration loading
//!
//! Sources are applied in the order they were added, each one on top of the
//! result of the previous ones. A file source replaces the whole
//! configuration (missing fields take defaults), so it should come first.

use crate::config::env_loader::apply_env;
use crate::config::file_loader::load_from_file;
use crate::config::model::Config;
use crate::error::PaperResult;
use crate::prompt::Style;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "papergen.toml";

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub style: Option<Style>,
    pub idle_timeout_secs: Option<u64>,
    pub stream_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(style) = self.style {
            config.default_style = style;
        }
        if let Some(secs) = self.idle_timeout_secs {
            config.timeouts.idle_secs = secs;
        }
        if let Some(secs) = self.stream_timeout_secs {
            config.timeouts.stream_secs = secs;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a file; skipped if the file is absent
    File(PathBuf),
    /// `PAPERGEN_*` environment variables
    Environment,
    /// Command line values
    CommandLine(ConfigOverrides),
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add command line overrides
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::CommandLine(overrides))
    }

    /// Load configuration from all sources and validate the result
    pub fn load(self) -> PaperResult<Config> {
        let mut config = Config::default();

        for source in &self.sources {
            match source {
                ConfigSource::File(path) => match load_from_file(path)? {
                    Some(from_file) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        config = from_file;
                    }
                    None => {
                        tracing::debug!(path = %path.display(), "config file not found, skipping");
                    }
                },
                ConfigSource::Environment => apply_env(&mut config)?,
                ConfigSource::CommandLine(overrides) => overrides.apply(&mut config),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Per-user configuration file, e.g. `~/.config/papergen/papergen.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("papergen").join(DEFAULT_CONFIG_FILE))
}

/// Load configuration the way the CLI does.
///
/// Uses `path` if it exists, otherwise the per-user file, then overlays the
/// environment and the command line overrides.
pub fn load_config(path: &Path, overrides: ConfigOverrides) -> PaperResult<Config> {
    let file = if path.exists() {
        Some(path.to_path_buf())
    } else {
        user_config_path().filter(|p| p.exists())
    };

    let mut loader = ConfigLoader::new();
    if let Some(file) = file {
        loader = loader.with_file(file);
    }
    loader.with_env().with_overrides(overrides).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaperError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("papergen.toml");
        fs::write(&path, "default_style = \"Diploma\"\n[timeouts]\nidle_secs = 9\n").unwrap();

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_overrides(ConfigOverrides {
                style: Some(Style::Casual),
                ..ConfigOverrides::default()
            })
            .load()
            .unwrap();

        assert_eq!(config.default_style, Style::Casual);
        assert_eq!(config.timeouts.idle_secs, 9);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::new()
            .with_file(temp_dir.path().join("nope.toml"))
            .load()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_result_is_validated() {
        let result = ConfigLoader::new()
            .with_overrides(ConfigOverrides {
                stream_timeout_secs: Some(0),
                ..ConfigOverrides::default()
            })
            .load();
        assert!(matches!(result, Err(PaperError::Config(_))));
    }
}
