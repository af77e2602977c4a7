// File: signup-engine/src/field.rs
// Purpose: Field identifiers, per-field state and validation outcomes

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier of a form field, spelled like the markup `id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldId {
    Nom,
    Prenom,
    DateNaissance,
    Email,
    CodeConfidentiel,
    /// Any other field; validated as a plain required field
    Other(String),
}

impl FieldId {
    /// The five fields with dedicated rules, in form order
    pub const KNOWN: [FieldId; 5] = [
        FieldId::Nom,
        FieldId::Prenom,
        FieldId::DateNaissance,
        FieldId::Email,
        FieldId::CodeConfidentiel,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FieldId::Nom => "nom",
            FieldId::Prenom => "prenom",
            FieldId::DateNaissance => "dateNaissance",
            FieldId::Email => "email",
            FieldId::CodeConfidentiel => "codeConfidentiel",
            FieldId::Other(name) => name,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldId::from(s))
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        match s {
            "nom" => FieldId::Nom,
            "prenom" => FieldId::Prenom,
            "dateNaissance" => FieldId::DateNaissance,
            "email" => FieldId::Email,
            "codeConfidentiel" => FieldId::CodeConfidentiel,
            other => FieldId::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        match FieldId::from(s.as_str()) {
            FieldId::Other(_) => FieldId::Other(s),
            known => known,
        }
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        match id {
            FieldId::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Outcome of running a field's validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The message to display, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => Some(message),
        }
    }
}

impl From<Result<(), String>> for ValidationResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => ValidationResult::Valid,
            Err(message) => ValidationResult::Invalid(message),
        }
    }
}

/// Snapshot of one field: current value and whether the user has interacted with it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
}
