//! Casing predicates for token shape checks.
//!
//! A token counts as regularly cased when it is all-lowercase, all-uppercase
//! or title-case. Uncased characters (digits, punctuation, hyphens) are
//! ignored, but each predicate needs at least one cased character.

/// All cased characters are lowercase, and there is at least one.
pub fn is_lower(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            cased = true;
        }
    }
    cased
}

/// All cased characters are uppercase, and there is at least one.
pub fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Uppercase characters only start a cased run and lowercase ones only continue it.
///
/// `"Self-Attention"` is title-case (each run starts after the hyphen);
/// `"McDonald"` and `"yNon"` are not.
pub fn is_title(s: &str) -> bool {
    let mut cased = false;
    let mut in_run = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if in_run {
                return false;
            }
            in_run = true;
            cased = true;
        } else if c.is_lowercase() {
            if !in_run {
                return false;
            }
            in_run = true;
            cased = true;
        } else {
            in_run = false;
        }
    }

    cased
}

/// All-lowercase, all-uppercase, or title-case.
pub fn is_regular(s: &str) -> bool {
    is_lower(s) || is_upper(s) || is_title(s)
}
