//! Environment variable-based configuration overlay

use crate::config::model::Config;
use crate::error::{PaperError, PaperResult};

pub const ENV_ENDPOINT: &str = "PAPERGEN_ENDPOINT";
pub const ENV_STYLE: &str = "PAPERGEN_STYLE";
pub const ENV_CONNECT_TIMEOUT: &str = "PAPERGEN_CONNECT_TIMEOUT";
pub const ENV_IDLE_TIMEOUT: &str = "PAPERGEN_IDLE_TIMEOUT";
pub const ENV_STREAM_TIMEOUT: &str = "PAPERGEN_STREAM_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "PAPERGEN_LOG_LEVEL";

/// Overlay `PAPERGEN_*` variables from the process environment
pub fn apply_env(config: &mut Config) -> PaperResult<()> {
    apply_env_from(config, |key| std::env::var(key).ok())
}

/// Overlay variables provided by `lookup`
///
/// Unset or empty variables leave the corresponding field untouched.
pub fn apply_env_from<F>(config: &mut Config, lookup: F) -> PaperResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(endpoint) = get(ENV_ENDPOINT) {
        config.endpoint = endpoint;
    }

    if let Some(style) = get(ENV_STYLE) {
        config.default_style = style.parse()?;
    }

    if let Some(value) = get(ENV_CONNECT_TIMEOUT) {
        config.timeouts.connect_secs = parse_secs(ENV_CONNECT_TIMEOUT, &value)?;
    }

    if let Some(value) = get(ENV_IDLE_TIMEOUT) {
        config.timeouts.idle_secs = parse_secs(ENV_IDLE_TIMEOUT, &value)?;
    }

    if let Some(value) = get(ENV_STREAM_TIMEOUT) {
        config.timeouts.stream_secs = parse_secs(ENV_STREAM_TIMEOUT, &value)?;
    }

    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }

    Ok(())
}

fn parse_secs(key: &str, value: &str) -> PaperResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| PaperError::config(format!("Invalid {} value: '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Style;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_fields() {
        let mut config = Config::default();
        apply_env_from(
            &mut config,
            lookup(&[
                (ENV_ENDPOINT, "https://gen.example.com/stream"),
                (ENV_STYLE, "casual"),
                (ENV_IDLE_TIMEOUT, "5"),
                (ENV_LOG_LEVEL, "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://gen.example.com/stream");
        assert_eq!(config.default_style, Style::Casual);
        assert_eq!(config.timeouts.idle_secs, 5);
        assert_eq!(config.timeouts.stream_secs, 300);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let mut config = Config::default();
        apply_env_from(&mut config, lookup(&[(ENV_ENDPOINT, "  ")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let mut config = Config::default();
        let err = apply_env_from(&mut config, lookup(&[(ENV_STREAM_TIMEOUT, "soon")])).unwrap_err();
        assert!(matches!(err, PaperError::Config(msg) if msg.contains(ENV_STREAM_TIMEOUT)));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let mut config = Config::default();
        let err = apply_env_from(&mut config, lookup(&[(ENV_STYLE, "poetic")])).unwrap_err();
        assert!(matches!(err, PaperError::InvalidInput(_)));
    }
}
