//! String helpers.
//!
//! ## Notes
//! - **Length model**: Unicode scalars (Rust `char`), not bytes. `truncate` counts chars.
//! - **Palindromes**: only ASCII letters and digits take part in the comparison; everything else (punctuation,
//!   whitespace, non-ASCII text) is dropped first.

/// Suffix appended by [`truncate`] when callers have no preference.
pub const DEFAULT_TRUNCATE_SUFFIX: &str = "...";

/// Reverse a string by Unicode scalar.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Uppercase the first character and lowercase the rest.
///
/// ## Returns
/// - `String`: the capitalized string; empty input yields an empty string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(s.len());
    out.extend(first.to_uppercase());
    out.push_str(&chars.as_str().to_lowercase());
    out
}

/// Count whitespace-separated words.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Shorten `s` to at most `max_len` chars, ending with `suffix` when shortened.
///
/// ## Parameters
/// - `s`: String to shorten.
/// - `max_len`: Maximum length in chars, suffix included.
/// - `suffix`: Marker appended to shortened output (see [`DEFAULT_TRUNCATE_SUFFIX`]).
///
/// ## Returns
/// - `String`: `s` unchanged if it already fits; otherwise the first `max_len - len(suffix)` chars followed by
///   `suffix`. When the suffix alone is longer than `max_len`, the result is just the suffix.
pub fn truncate(s: &str, max_len: usize, suffix: &str) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(suffix.chars().count());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Check whether `s` reads the same backwards, ignoring case and non-alphanumerics.
pub fn is_palindrome(s: &str) -> bool {
    let cleaned: Vec<char> = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// Convert `camelCase` to `snake_case` by prefixing each ASCII uppercase letter with `_`.
///
/// ## Notes
/// - A leading capital also gets a prefix: `"Hello"` becomes `"_hello"`.
pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for ch in s.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse("hello"), "olleh");
        assert_eq!(reverse(""), "");
        assert_eq!(reverse("你好"), "好你");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("WORLD"), "World");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émile"), "Émile");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("hello world"), 2);
        assert_eq!(word_count("  spaced   out  words "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, DEFAULT_TRUNCATE_SUFFIX), "Hello...");
        assert_eq!(truncate("Hi", 10, DEFAULT_TRUNCATE_SUFFIX), "Hi");
        assert_eq!(truncate("Hello World", 7, "~"), "Hello ~");
        assert_eq!(truncate("Hello", 2, DEFAULT_TRUNCATE_SUFFIX), "...");
    }

    #[test]
    fn test_is_palindrome() {
        assert!(is_palindrome("racecar"));
        assert!(is_palindrome("A man, a plan, a canal: Panama"));
        assert!(!is_palindrome("hello"));
        assert!(is_palindrome(""));
    }

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("helloWorld"), "hello_world");
        assert_eq!(camel_to_snake("myVariableName"), "my_variable_name");
        assert_eq!(camel_to_snake("lower"), "lower");
    }
}
