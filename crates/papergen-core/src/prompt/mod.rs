//! Prompt construction

mod style;

pub use style::Style;

use crate::error::{PaperError, PaperResult};
use serde::Serialize;
use std::fmt;

/// Extra instruction appended for the diploma style
const DIPLOMA_CLAUSE: &str = "Make sure there is level is diploma.";

/// A prompt ready to be sent to the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Build the two-paper prompt from user content and a style.
    ///
    /// The content is trimmed and must not be empty. A terminating `.` is
    /// added unless the content already ends with one.
    pub fn build(content: &str, style: Style) -> PaperResult<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(PaperError::invalid_input("Content must not be empty"));
        }

        let clause = match style {
            Style::Diploma => DIPLOMA_CLAUSE,
            _ => "",
        };
        let terminator = if content.ends_with('.') { "" } else { "." };

        Ok(Self(format!(
            "Generate 2 {style} academic papers labelled \"1.\" and \"2.\". {clause}\n      \
             Make sure each generated content is less than 1000 characters: {content}{terminator}"
        )))
    }

    /// Use the given text verbatim as the prompt
    pub fn raw(text: impl Into<String>) -> PaperResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PaperError::invalid_input("Prompt must not be empty"));
        }
        Ok(Self(text))
    }

    /// The prompt text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the prompt and return its text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_professional() {
        let prompt = Prompt::build("Quantum error correction", Style::Professional).unwrap();
        assert_eq!(
            prompt.as_str(),
            "Generate 2 Professional academic papers labelled \"1.\" and \"2.\". \n      \
             Make sure each generated content is less than 1000 characters: Quantum error correction."
        );
    }

    #[test]
    fn test_build_diploma_adds_clause() {
        let prompt = Prompt::build("Soil erosion.", Style::Diploma).unwrap();
        assert!(prompt.as_str().contains("Generate 2 Diploma academic papers"));
        assert!(prompt.as_str().contains(DIPLOMA_CLAUSE));
        assert!(prompt.as_str().ends_with("characters: Soil erosion."));
    }

    #[test]
    fn test_build_does_not_double_the_period() {
        let prompt = Prompt::build("  Ends with a period.\n", Style::Casual).unwrap();
        assert!(prompt.as_str().ends_with("Ends with a period."));
        assert!(!prompt.as_str().contains(DIPLOMA_CLAUSE));
    }

    #[test]
    fn test_build_rejects_blank_content() {
        let err = Prompt::build("   \n", Style::Professional).unwrap_err();
        assert!(matches!(err, PaperError::InvalidInput(_)));
    }

    #[test]
    fn test_raw_prompt() {
        assert_eq!(Prompt::raw("hello").unwrap().into_inner(), "hello");
        assert!(Prompt::raw("").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let prompt = Prompt::raw("hi").unwrap();
        assert_eq!(serde_json::to_string(&prompt).unwrap(), "\"hi\"");
    }
}
