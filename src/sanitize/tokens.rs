//! Token shape predicates and the final token filter.

use super::casing;
use serde::Serialize;

/// Punctuation and quote characters stripped from both ends of a token.
pub const BORDER_CHARS: &[char] = &[
    '.', ',', ';', ':', '(', ')', '[', ']', '{', '}', '\'', '"', '“', '”', '‘', '’',
];

/// Single-character tokens allowed through the final filter.
const SINGLE_CHAR_WORDS: &[&str] = &["a", "A", "I"];

/// Single uppercase letters a line may contain without losing validity.
const SINGLE_UPPER_WORDS: &[&str] = &["I", "A"];

/// Strips the border set from both ends.
pub fn strip_border(token: &str) -> &str {
    token.trim_matches(|c| BORDER_CHARS.contains(&c))
}

/// Returns true if any character is numeric (`S4`, `x²`, `2019`).
///
/// Covers every Unicode number category, so roman-numeral letters (`Ⅳ`) and
/// vulgar fractions (`½`) count as well.
pub fn has_digit(token: &str) -> bool {
    token.chars().any(char::is_numeric)
}

/// Returns true for one uppercase letter other than "I" and "A" (figure panel labels and the like).
pub fn is_stray_capital(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_uppercase() && !SINGLE_UPPER_WORDS.contains(&token),
        _ => false,
    }
}

/// Returns true for any single character outside the allow-list.
pub fn is_stray_character(token: &str) -> bool {
    token.chars().count() == 1 && !SINGLE_CHAR_WORDS.contains(&token)
}

/// Returns true if the raw token carries markup characters (`_`, `\`).
pub fn has_markup(raw: &str) -> bool {
    raw.contains('_') || raw.contains('\\')
}

/// Why the final filter dropped a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenRejection {
    /// Nothing left after stripping border punctuation
    Empty,
    /// Contains a digit
    Digit,
    /// Neither lowercase, uppercase nor title-case
    IrregularCase,
    /// Lone character outside the allow-list
    StrayCharacter,
    /// Contains `_` or `\`
    Markup,
}

/// Runs the final token checks in order, returning the emitted form.
pub fn screen_token(raw: &str) -> Result<&str, TokenRejection> {
    let stripped = strip_border(raw);

    if stripped.is_empty() {
        return Err(TokenRejection::Empty);
    }
    if has_digit(stripped) {
        return Err(TokenRejection::Digit);
    }
    if !casing::is_regular(stripped) {
        return Err(TokenRejection::IrregularCase);
    }
    if is_stray_character(stripped) {
        return Err(TokenRejection::StrayCharacter);
    }
    if has_markup(raw) {
        return Err(TokenRejection::Markup);
    }

    Ok(stripped)
}

/// Splits cleaned text on whitespace and keeps the tokens that pass [`screen_token`].
pub fn filter_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| screen_token(raw).ok())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_border() {
        assert_eq!(strip_border("well."), "well");
        assert_eq!(strip_border("(see"), "see");
        assert_eq!(strip_border("“quoted”,"), "quoted");
        assert_eq!(strip_border("don't"), "don't");
        assert_eq!(strip_border("..."), "");
    }

    #[test]
    fn test_screen_digits() {
        assert_eq!(screen_token("S4"), Err(TokenRejection::Digit));
        assert_eq!(screen_token("2019)."), Err(TokenRejection::Digit));
    }

    #[test]
    fn test_has_digit_unicode_numbers() {
        assert!(has_digit("x²"));
        assert!(has_digit("Ⅳ"));
        assert!(has_digit("½"));
        assert!(has_digit("٣"));
        assert!(!has_digit("naïve"));
    }

    #[test]
    fn test_screen_casing() {
        assert_eq!(screen_token("yNon"), Err(TokenRejection::IrregularCase));
        assert_eq!(screen_token("NASA"), Ok("NASA"));
        assert_eq!(screen_token("The"), Ok("The"));
    }

    #[test]
    fn test_screen_single_characters() {
        assert_eq!(screen_token("a"), Ok("a"));
        assert_eq!(screen_token("A"), Ok("A"));
        assert_eq!(screen_token("I,"), Ok("I"));
        assert_eq!(screen_token("x"), Err(TokenRejection::StrayCharacter));
        assert_eq!(screen_token("B."), Err(TokenRejection::StrayCharacter));
    }

    #[test]
    fn test_screen_markup() {
        assert_eq!(screen_token("snake_case"), Err(TokenRejection::Markup));
        assert_eq!(screen_token("\\alpha"), Err(TokenRejection::Markup));
    }

    #[test]
    fn test_screen_empty() {
        assert_eq!(screen_token("()"), Err(TokenRejection::Empty));
    }

    #[test]
    fn test_stray_capital() {
        assert!(is_stray_capital("B"));
        assert!(!is_stray_capital("A"));
        assert!(!is_stray_capital("I"));
        assert!(!is_stray_capital("b"));
        assert!(!is_stray_capital("BC"));
    }

    #[test]
    fn test_filter_tokens_keeps_order() {
        let words = filter_tokens("The model S4 learns well.");
        assert_eq!(words, vec!["The", "model", "learns", "well"]);
    }
}
