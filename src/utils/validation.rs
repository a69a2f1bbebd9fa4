use anyhow::{anyhow, Result};

/// Characters the store refuses in a path segment.
pub const FORBIDDEN_KEY_CHARS: [char; 6] = ['.', '$', '#', '[', ']', '/'];

/// Splits raw command arguments on whitespace.
pub fn split_args(args: &str) -> Vec<&str> {
    args.split_whitespace().collect()
}

/// Checks that a keyword or user id can be used as a single path segment.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(anyhow!("Key cannot be empty"));
    }

    if let Some(c) = key.chars().find(|c| FORBIDDEN_KEY_CHARS.contains(c)) {
        return Err(anyhow!("Key '{}' cannot contain '{}'", key, c));
    }

    if key.chars().any(char::is_control) {
        return Err(anyhow!("Key cannot contain control characters"));
    }

    if key.len() > 768 {
        return Err(anyhow!("Key cannot be longer than 768 bytes"));
    }

    Ok(())
}

/// Joins the value tokens with single spaces and parses them as one integer.
pub fn parse_int_value(tokens: &[&str]) -> Result<i64> {
    let joined = tokens.join(" ");
    let joined = joined.trim();

    if joined.is_empty() {
        return Err(anyhow!("Value cannot be empty"));
    }

    joined
        .parse::<i64>()
        .map_err(|_| anyhow!("'{}' is not an integer", joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_args_collapses_whitespace() {
        assert_eq!(split_args("  apple   pie "), vec!["apple", "pie"]);
        assert!(split_args("").is_empty());
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn test_validate_key_accepts_free_form_text() {
        assert!(validate_key("apple").is_ok());
        assert!(validate_key("café").is_ok());
        assert!(validate_key("with-dash_and:colon").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_characters() {
        for key in ["a.b", "a$b", "a#b", "a[b", "a]b", "a/b"] {
            assert!(validate_key(key).is_err(), "{key} should be rejected");
        }
    }

    #[test]
    fn test_parse_int_value() {
        assert_eq!(parse_int_value(&["42"]).unwrap(), 42);
        assert_eq!(parse_int_value(&["-7"]).unwrap(), -7);
        assert_eq!(parse_int_value(&["0"]).unwrap(), 0);
        assert!(parse_int_value(&[]).is_err());
        assert!(parse_int_value(&["1", "2"]).is_err());
        assert!(parse_int_value(&["abc"]).is_err());
    }
}
