//! Identifier validation
//!
//! The lexical rule only: a valid identifier is non-empty, starts with an
//! ASCII letter or underscore, and continues with ASCII letters, digits, or
//! underscores.  Reserved words are deliberately not checked: this is a
//! naming-convention linter, not a grammar validator.

/// Test a token against the lexical rule for a valid C identifier.
pub fn is_valid_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_digit_underscore() {
        assert!(is_valid_identifier("x_1"));
    }

    #[test]
    fn test_leading_digit_rejected() {
        assert!(!is_valid_identifier("1x"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_leading_underscore_ok() {
        assert!(is_valid_identifier("_ok"));
    }

    #[test]
    fn test_hyphen_rejected() {
        assert!(!is_valid_identifier("bad-name"));
    }

    #[test]
    fn test_keywords_pass_the_lexical_rule() {
        // No reserved-word check: 'int' is lexically fine.
        assert!(is_valid_identifier("int"));
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert!(!is_valid_identifier("variabile_però"));
        assert!(!is_valid_identifier("über"));
    }
}
