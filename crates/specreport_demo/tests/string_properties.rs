//! Property tests for `specreport_demo::strings`.

use proptest::prelude::*;
use specreport_demo::strings::{DEFAULT_TRUNCATE_SUFFIX, camel_to_snake, is_palindrome, reverse, truncate, word_count};

proptest! {
    /// Property: reversing twice is the identity.
    #[test]
    fn reverse_is_an_involution(s in ".*") {
        prop_assert_eq!(reverse(&reverse(&s)), s);
    }

    /// Property: truncated output never exceeds the limit unless the suffix alone does.
    #[test]
    fn truncate_respects_limit(s in ".{0,64}", max in 0usize..40) {
        let out = truncate(&s, max, DEFAULT_TRUNCATE_SUFFIX);
        let limit = max.max(DEFAULT_TRUNCATE_SUFFIX.len());
        prop_assert!(out.chars().count() <= limit);
        if s.chars().count() <= max {
            prop_assert_eq!(out, s);
        }
    }

    /// Property: snake case output has no ASCII uppercase left.
    #[test]
    fn camel_to_snake_lowercases_ascii(s in "[a-zA-Z0-9]{0,32}") {
        let snake = camel_to_snake(&s);
        prop_assert!(!snake.chars().any(|c| c.is_ascii_uppercase()));
    }

    /// Property: a string joined with its reverse is always a palindrome.
    #[test]
    fn mirrored_strings_are_palindromes(s in "[a-z0-9 ,]{0,24}") {
        let mirrored = format!("{}{}", s, reverse(&s));
        prop_assert!(is_palindrome(&mirrored));
    }

    /// Property: joining n words with varied whitespace counts n words.
    #[test]
    fn word_count_matches_joined_words(words in prop::collection::vec("[a-z]{1,8}", 0..10)) {
        let joined = words.join(" \t ");
        prop_assert_eq!(word_count(&joined), words.len());
    }
}
