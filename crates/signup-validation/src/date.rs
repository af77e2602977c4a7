//! Birth date masking and calendar validation
//!
//! The mask runs on the whole input buffer on every keystroke, not on the
//! last typed character, so pasting `29.02.2024` or `29 02 2024` gives the
//! same result as typing `29022024`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Message shown while the value is not shaped like `jj/mm/aaaa`
pub const DATE_FORMAT_MESSAGE: &str = "Format de date invalide (jj/mm/aaaa)";

/// Message shown when the value is well shaped but not a real day
pub const DATE_INVALID_MESSAGE: &str = "Date invalide";

/// Maximum length of a masked date
pub const MASKED_DATE_LEN: usize = 10;

/// Years below this are rejected: four digits are typed, but `0089` is not a birth year
pub const MIN_YEAR: i32 = 100;

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s.\-]+").unwrap());

static NOT_DIGIT_OR_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9/]").unwrap());

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").unwrap()
});

/// Applies the `jj/mm/aaaa` input mask to a raw buffer.
///
/// 1. every run of whitespace, `.` or `-` becomes a single `/`
/// 2. anything that is not an ASCII digit or `/` is dropped
/// 3. a `/` is inserted at positions 2 and 5 when missing
/// 4. the result is cut to 10 characters
///
/// # Examples
/// ```
/// use signup_validation::mask_date;
/// assert_eq!(mask_date("29022024"), "29/02/2024");
/// assert_eq!(mask_date("29-02-2024"), "29/02/2024");
/// assert_eq!(mask_date("290"), "29/0");
/// ```
pub fn mask_date(raw: &str) -> String {
    let slashed = SEPARATOR_RUN.replace_all(raw, "/");
    // Only ASCII survives this step, so byte offsets below are char offsets.
    let mut value = NOT_DIGIT_OR_SLASH.replace_all(&slashed, "").into_owned();

    if value.len() > 2 && value.as_bytes()[2] != b'/' {
        value.insert(2, '/');
    }
    if value.len() > 5 && value.as_bytes()[5] != b'/' {
        value.insert(5, '/');
    }

    value.truncate(MASKED_DATE_LEN);
    value
}

/// Parses a masked `jj/mm/aaaa` value into a calendar date.
///
/// Returns `None` when the shape is wrong or when the components do not name
/// a real day (`31/02/2024`, `29/02/2023`, month `13`, year `0099`...).
pub fn parse_date(masked: &str) -> Option<NaiveDate> {
    let caps = DATE_REGEX.captures(masked)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    if year < MIN_YEAR {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Validates a masked date: shape first, then calendar existence
pub fn validate_date(masked: &str) -> Result<(), String> {
    if !DATE_REGEX.is_match(masked) {
        return Err(DATE_FORMAT_MESSAGE.to_string());
    }

    match parse_date(masked) {
        Some(_) => Ok(()),
        None => Err(DATE_INVALID_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("2", "2")]
    #[case("29", "29")]
    #[case("290", "29/0")]
    #[case("2902", "29/02")]
    #[case("29022", "29/02/2")]
    #[case("29022024", "29/02/2024")]
    #[case("29.02.2024", "29/02/2024")]
    #[case("29 - 02 - 2024", "29/02/2024")]
    #[case("29/02/2024", "29/02/2024")]
    #[case("2902202499", "29/02/2024")]
    #[case("ab29cd02ef2024", "29/02/2024")]
    #[case("1 1 2024", "1//1//2024")]
    fn test_mask(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(mask_date(raw), expected);
    }

    #[test]
    fn test_mask_is_fixed_point() {
        for raw in ["29022024", "1 1 2024", "12.3", "x", "31/1", "0101200"] {
            let once = mask_date(raw);
            assert_eq!(mask_date(&once), once, "raw: {raw}");
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(validate_date(&mask_date("29022024")).is_ok());
        assert_eq!(
            validate_date(&mask_date("29022023")).unwrap_err(),
            DATE_INVALID_MESSAGE
        );
        assert!(validate_date("29/02/2000").is_ok());
        assert!(validate_date("29/02/1900").is_err());
    }

    #[test]
    fn test_overflowing_components() {
        assert_eq!(validate_date("31/02/2024").unwrap_err(), DATE_INVALID_MESSAGE);
        assert_eq!(validate_date("31/04/2024").unwrap_err(), DATE_INVALID_MESSAGE);
        assert_eq!(validate_date("00/01/2024").unwrap_err(), DATE_INVALID_MESSAGE);
        assert_eq!(validate_date("12/13/2024").unwrap_err(), DATE_INVALID_MESSAGE);
        assert!(validate_date("31/12/1999").is_ok());
    }

    #[rstest]
    #[case("01/01/0000")]
    #[case("29/02/0000")]
    #[case("01/01/0050")]
    #[case("15/06/0099")]
    fn test_years_below_100_are_not_real_days(#[case] masked: &str) {
        assert_eq!(parse_date(masked), None);
        assert_eq!(validate_date(masked).unwrap_err(), DATE_INVALID_MESSAGE);
    }

    #[test]
    fn test_year_100_is_accepted() {
        assert_eq!(parse_date("01/01/0100"), NaiveDate::from_ymd_opt(100, 1, 1));
    }

    #[test]
    fn test_wrong_shape() {
        assert_eq!(validate_date("").unwrap_err(), DATE_FORMAT_MESSAGE);
        assert_eq!(validate_date("29/02").unwrap_err(), DATE_FORMAT_MESSAGE);
        assert_eq!(validate_date("1//1//2024").unwrap_err(), DATE_FORMAT_MESSAGE);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("14/07/1989"), NaiveDate::from_ymd_opt(1989, 7, 14));
        assert_eq!(parse_date("14/07/89"), None);
    }
}
