// File: signup-cli/src/session.rs
// Purpose: Scripted form sessions for `signup replay`

use anyhow::{Context, Result};
use serde::Deserialize;
use signup_engine::FieldId;
use std::fs;
use std::path::Path;

/// A sequence of user interactions
///
/// ```toml
/// [[steps]]
/// action = "type"
/// field = "dateNaissance"
/// text = "29022024"
///
/// [[steps]]
/// action = "submit"
/// ```
#[derive(Debug, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    Focus { field: FieldId },
    /// Replace the whole value at once (paste)
    Input { field: FieldId, value: String },
    /// Type text one character at a time, the formatted value written back after each keystroke
    Type { field: FieldId, text: String },
    Submit,
    /// Close the confirmation dialog
    Dismiss,
    Reset,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Focus { field } => write!(f, "focus {}", field),
            Step::Input { field, value } => write!(f, "input {} {:?}", field, value),
            Step::Type { field, text } => write!(f, "type {} {:?}", field, text),
            Step::Submit => write!(f, "submit"),
            Step::Dismiss => write!(f, "dismiss"),
            Step::Reset => write!(f, "reset"),
        }
    }
}

impl Session {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse session file: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
