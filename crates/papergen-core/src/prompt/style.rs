//! Generation styles

use crate::error::PaperError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Style selector sent to the upstream model as part of the prompt.
///
/// The style carries no local behavior beyond how it is rendered into the
/// prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    #[serde(alias = "professional")]
    Professional,
    #[serde(alias = "diploma")]
    Diploma,
    #[serde(alias = "casual")]
    Casual,
}

impl Style {
    /// Every selectable style, in display order
    pub const ALL: [Style; 3] = [Style::Professional, Style::Diploma, Style::Casual];

    /// Name as it appears in prompts and listings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Diploma => "Diploma",
            Self::Casual => "Casual",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Self::Professional => "Formal register suitable for publication",
            Self::Diploma => "Pitched at diploma level",
            Self::Casual => "Relaxed, conversational register",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = PaperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(Style::as_str).collect();
                PaperError::invalid_input(format!(
                    "Unknown style '{}', expected one of: {}",
                    wanted,
                    valid.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("diploma".parse::<Style>().unwrap(), Style::Diploma);
        assert_eq!(" CASUAL ".parse::<Style>().unwrap(), Style::Casual);
        assert_eq!("Professional".parse::<Style>().unwrap(), Style::Professional);
    }

    #[test]
    fn test_parse_unknown_lists_valid_styles() {
        let err = "poetic".parse::<Style>().unwrap_err();
        assert!(err.to_string().contains("Professional, Diploma, Casual"));
    }

    #[test]
    fn test_default_is_professional() {
        assert_eq!(Style::default(), Style::Professional);
    }

    #[test]
    fn test_serde_accepts_lowercase_alias() {
        let style: Style = serde_json::from_str("\"diploma\"").unwrap();
        assert_eq!(style, Style::Diploma);
        assert_eq!(serde_json::to_string(&style).unwrap(), "\"Diploma\"");
    }
}
