//! String validation and casing transforms

/// Message shown when a required field is blank
pub const REQUIRED_MESSAGE: &str = "Ce champ est requis";

/// Returns true when the value is empty once surrounding whitespace is removed
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates that a field holds something other than whitespace
pub fn validate_required(value: &str) -> Result<(), String> {
    if is_blank(value) {
        Err(REQUIRED_MESSAGE.to_string())
    } else {
        Ok(())
    }
}

/// Validates minimum length, counted in characters rather than bytes
/// so accented names are not over-counted.
pub fn validate_min_length(value: &str, min: usize) -> Result<(), String> {
    if value.chars().count() >= min {
        Ok(())
    } else {
        Err(format!("Ce champ doit avoir au moins {} caractères", min))
    }
}

/// Upper-cases the whole value (used for family names)
pub fn uppercase(value: &str) -> String {
    value.to_uppercase()
}

/// Lower-cases the value, then capitalizes the first letter or digit of every word.
///
/// A word is a run of letters, digits and `_`, so `jean-pierre` becomes
/// `Jean-Pierre` while `jean_pierre` becomes `Jean_pierre`.
/// Characters whose upper-case form spans several characters (`ß`) are kept
/// as-is so that applying the transform twice gives the same result.
///
/// # Examples
/// ```
/// use signup_validation::title_case;
/// assert_eq!(title_case("MARIE claire"), "Marie Claire");
/// assert_eq!(title_case("élodie"), "Élodie");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.chars().flat_map(char::to_lowercase) {
        if is_word_char(c) {
            if at_word_start {
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(single), None) => out.push(single),
                    _ => out.push(c),
                }
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
