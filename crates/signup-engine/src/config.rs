// File: signup-engine/src/config.rs
// Purpose: Form configuration parsing from signup.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use signup_validation::CodeSuffix;
use std::fs;
use std::path::Path;

use crate::rules::DEFAULT_MIN_NAME_LENGTH;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "signup.toml";

/// Form configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FormConfig {
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub fields: FieldsConfig,

    #[serde(default)]
    pub confirmation: ConfirmationConfig,
}

/// Tunable validation rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    /// Minimum length of `nom` and `prenom` (default: 3)
    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,

    /// Accepted case of the confidential code's trailing letter (default: upper)
    #[serde(default)]
    pub code_suffix: CodeSuffix,
}

/// Fields beyond the five built-in ones
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FieldsConfig {
    /// Markup ids of additional fields that must not be blank
    #[serde(default)]
    pub extra_required: Vec<String>,
}

/// Text of the confirmation dialog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationConfig {
    #[serde(default = "default_confirmation_title")]
    pub title: String,

    #[serde(default = "default_confirmation_message")]
    pub message: String,
}

// Default values
fn default_min_name_length() -> usize {
    DEFAULT_MIN_NAME_LENGTH
}

fn default_confirmation_title() -> String {
    "Vos données sont valides, elles vont être transmises sur nos serveurs pour traitement."
        .to_string()
}

fn default_confirmation_message() -> String {
    "Nous sommes ravis de vous compter parmi nos nouveaux clients".to_string()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_name_length: default_min_name_length(),
            code_suffix: CodeSuffix::default(),
        }
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            title: default_confirmation_title(),
            message: default_confirmation_message(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from the default path (./signup.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FormConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.rules.min_name_length, 3);
        assert_eq!(config.rules.code_suffix, CodeSuffix::Upper);
        assert!(config.fields.extra_required.is_empty());
        assert!(config.confirmation.title.starts_with("Vos données sont valides"));
    }

    #[test]
    fn test_empty_config() {
        let config = FormConfig::from_toml("").unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_custom_rules() {
        let toml = r#"
            [rules]
            code_suffix = "lower"

            [fields]
            extra_required = ["telephone", "ville"]
        "#;
        let config = FormConfig::from_toml(toml).unwrap();
        assert_eq!(config.rules.code_suffix, CodeSuffix::Lower);
        assert_eq!(config.rules.min_name_length, 3);
        assert_eq!(config.fields.extra_required, vec!["telephone", "ville"]);
    }

    #[test]
    fn test_unknown_suffix_is_rejected() {
        let toml = r#"
            [rules]
            code_suffix = "maybe"
        "#;
        assert!(FormConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = FormConfig::load("does/not/exist/signup.toml").unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("signup-config-{}.toml", std::process::id()));
        fs::write(&path, "[rules]\nmin_name_length = 2\n").unwrap();
        let config = FormConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.rules.min_name_length, 2);
    }

    #[test]
    fn test_toml_round_trip_keeps_suffix() {
        let mut config = FormConfig::default();
        config.rules.code_suffix = CodeSuffix::Either;
        let text = config.to_toml().unwrap();
        assert!(text.contains("code_suffix = \"either\""));
        assert_eq!(FormConfig::from_toml(&text).unwrap(), config);
    }
}
