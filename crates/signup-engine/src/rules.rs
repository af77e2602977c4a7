// File: signup-engine/src/rules.rs
// Purpose: Per-field transform + validator pairs

use crate::config::FormConfig;
use crate::field::{FieldId, ValidationResult};
use signup_validation as core;
use signup_validation::CodeSuffix;
use std::collections::BTreeMap;

/// Default minimum length for family and given names
pub const DEFAULT_MIN_NAME_LENGTH: usize = 3;

/// Casing applied to a name field as the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCasing {
    /// `DUPONT`
    Upper,
    /// `Jean-Pierre`
    Title,
}

/// What happens to a field's value on every change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Required name with a minimum length, re-cased on input
    Name { casing: NameCasing, min_length: usize },
    /// `jj/mm/aaaa` mask, then shape and calendar checks
    BirthDate,
    Email,
    ConfidentialCode(CodeSuffix),
    /// Non-blank, no transform
    Required,
}

impl FieldRule {
    /// Formats a raw value. Applying it to its own output changes nothing.
    pub fn transform(&self, raw: &str) -> String {
        match self {
            FieldRule::Name { casing: NameCasing::Upper, .. } => core::uppercase(raw),
            FieldRule::Name { casing: NameCasing::Title, .. } => core::title_case(raw),
            FieldRule::BirthDate => core::mask_date(raw),
            FieldRule::Email | FieldRule::ConfidentialCode(_) | FieldRule::Required => {
                raw.to_string()
            }
        }
    }

    /// Validates an already transformed value
    pub fn validate(&self, value: &str) -> ValidationResult {
        let result = match self {
            FieldRule::Name { min_length, .. } => core::validate_required(value)
                .and_then(|()| core::validate_min_length(value, *min_length)),
            FieldRule::BirthDate => core::validate_date(value),
            FieldRule::Email => core::validate_email(value),
            FieldRule::ConfidentialCode(suffix) => core::validate_confidential_code(value, *suffix),
            FieldRule::Required => core::validate_required(value),
        };
        result.into()
    }
}

/// Mapping from field to rule, iterated in form order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    rules: BTreeMap<FieldId, FieldRule>,
}

impl FieldRules {
    /// The five signup fields with the given name length and code suffix
    pub fn standard(min_name_length: usize, code_suffix: CodeSuffix) -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            FieldId::Nom,
            FieldRule::Name { casing: NameCasing::Upper, min_length: min_name_length },
        );
        rules.insert(
            FieldId::Prenom,
            FieldRule::Name { casing: NameCasing::Title, min_length: min_name_length },
        );
        rules.insert(FieldId::DateNaissance, FieldRule::BirthDate);
        rules.insert(FieldId::Email, FieldRule::Email);
        rules.insert(FieldId::CodeConfidentiel, FieldRule::ConfidentialCode(code_suffix));
        Self { rules }
    }

    /// Build the rule map described by a configuration.
    ///
    /// Extra required fields never override one of the five dedicated rules.
    pub fn from_config(config: &FormConfig) -> Self {
        let mut rules = Self::standard(config.rules.min_name_length, config.rules.code_suffix);
        for name in &config.fields.extra_required {
            let id = FieldId::from(name.as_str());
            if !rules.contains(&id) {
                rules.insert(id, FieldRule::Required);
            }
        }
        rules
    }

    pub fn insert(&mut self, field: FieldId, rule: FieldRule) {
        self.rules.insert(field, rule);
    }

    pub fn contains(&self, field: &FieldId) -> bool {
        self.rules.contains_key(field)
    }

    /// Rule for a field; unknown fields are plain required fields
    pub fn rule_for(&self, field: &FieldId) -> &FieldRule {
        self.rules.get(field).unwrap_or(&FieldRule::Required)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldId> {
        self.rules.keys()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for FieldRules {
    fn default() -> Self {
        Self::standard(DEFAULT_MIN_NAME_LENGTH, CodeSuffix::default())
    }
}
