//! Email validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Message shown for a malformed address
pub const EMAIL_MESSAGE: &str = "Adresse email invalide";

// Something without spaces or '@', an '@', and a domain with at least one dot
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Validates email shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(EMAIL_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("jean.dupont@banque.fr"));
        assert!(is_valid_email("user+tag@example.co.uk"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn test_message() {
        assert_eq!(validate_email("nope").unwrap_err(), EMAIL_MESSAGE);
    }
}
