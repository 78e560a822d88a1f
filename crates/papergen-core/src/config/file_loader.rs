//! File-based configuration loading

use crate::config::model::Config;
use crate::error::{PaperError, PaperResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension; anything
/// else is read as TOML. Returns `None` if the file doesn't exist.
pub fn load_from_file(path: &Path) -> PaperResult<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        PaperError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            PaperError::config(format!(
                "Failed to parse JSON config '{}': {}",
                path.display(),
                e
            ))
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            PaperError::config(format!(
                "Failed to parse YAML config '{}': {}",
                path.display(),
                e
            ))
        })?,
        _ => toml::from_str(&content).map_err(|e| {
            PaperError::config(format!(
                "Failed to parse TOML config '{}': {}",
                path.display(),
                e
            ))
        })?,
    };

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Style;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("papergen.toml");
        fs::write(
            &config_path,
            r#"
endpoint = "https://papers.example.com/api/generate"
default_style = "Casual"

[timeouts]
idle_secs = 15
"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap().unwrap();
        assert_eq!(config.endpoint, "https://papers.example.com/api/generate");
        assert_eq!(config.default_style, Style::Casual);
        assert_eq!(config.timeouts.idle_secs, 15);
        // Unset fields fall back to defaults
        assert_eq!(config.timeouts.stream_secs, 300);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("papergen.json");
        fs::write(
            &config_path,
            r#"{"default_style": "diploma", "logging": {"level": "debug", "format": "json"}}"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap().unwrap();
        assert_eq!(config.default_style, Style::Diploma);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("papergen.yaml");
        fs::write(&config_path, "timeouts:\n  connect_secs: 3\n").unwrap();

        let config = load_from_file(&config_path).unwrap().unwrap();
        assert_eq!(config.timeouts.connect_secs, 3);
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_from_file(&temp_dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "endpoint = [").unwrap();

        let err = load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, PaperError::Config(msg) if msg.contains("TOML")));
    }
}
