//! Confidential code validation
//!
//! Codes look like `FR12345ABCX`: the `FR` prefix, five digits, three
//! upper-case letters and a trailing `X`. Which case of the trailing letter
//! is accepted is a deployment choice, see [`CodeSuffix`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CODE_UPPER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^FR[0-9]{5}[A-Z]{3}X$").unwrap()
});

static CODE_LOWER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^FR[0-9]{5}[A-Z]{3}x$").unwrap()
});

static CODE_EITHER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^FR[0-9]{5}[A-Z]{3}[Xx]$").unwrap()
});

/// Accepted case of the trailing letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeSuffix {
    /// Only `X`
    #[default]
    Upper,
    /// Only `x`
    Lower,
    /// `X` or `x`
    Either,
}

impl CodeSuffix {
    fn regex(self) -> &'static Regex {
        match self {
            CodeSuffix::Upper => &*CODE_UPPER_REGEX,
            CodeSuffix::Lower => &*CODE_LOWER_REGEX,
            CodeSuffix::Either => &*CODE_EITHER_REGEX,
        }
    }

    /// The trailing letter as written in the error message
    pub fn label(self) -> &'static str {
        match self {
            CodeSuffix::Upper => "X",
            CodeSuffix::Lower => "x",
            CodeSuffix::Either => "X ou x",
        }
    }

    /// Full error message for a malformed code
    pub fn message(self) -> String {
        format!(
            "Format invalide. Le code doit commencer par FR, suivi de 5 chiffres, puis 3 lettres majuscules et se terminer par {}",
            self.label()
        )
    }
}

impl std::fmt::Display for CodeSuffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeSuffix::Upper => write!(f, "upper"),
            CodeSuffix::Lower => write!(f, "lower"),
            CodeSuffix::Either => write!(f, "either"),
        }
    }
}

/// Checks a confidential code against the configured suffix rule
pub fn is_valid_confidential_code(code: &str, suffix: CodeSuffix) -> bool {
    suffix.regex().is_match(code)
}

pub fn validate_confidential_code(code: &str, suffix: CodeSuffix) -> Result<(), String> {
    if is_valid_confidential_code(code, suffix) {
        Ok(())
    } else {
        Err(suffix.message())
    }
}
