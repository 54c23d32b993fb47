use specreport_demo::strings::{
    DEFAULT_TRUNCATE_SUFFIX, camel_to_snake, capitalize, is_palindrome, reverse, truncate, word_count,
};

use crate::runner::Suite;

pub(super) fn suite() -> Suite {
    Suite::new("StringUtils")
        .describe(
            Suite::new("reverse")
                .it("reverses a string", || {
                    assert_eq!(reverse("hello"), "olleh");
                    assert_eq!(reverse("abc"), "cba");
                })
                .it("handles the empty string", || assert_eq!(reverse(""), ""))
                .it("handles a single character", || assert_eq!(reverse("a"), "a"))
                .it("handles punctuation and non-ASCII text", || {
                    assert_eq!(reverse("hello!"), "!olleh");
                    assert_eq!(reverse("你好世界"), "界世好你");
                }),
        )
        .describe(
            Suite::new("capitalize")
                .it("uppercases the first letter", || {
                    assert_eq!(capitalize("hello"), "Hello");
                    assert_eq!(capitalize("world"), "World");
                })
                .it("lowercases the rest", || {
                    assert_eq!(capitalize("HELLO"), "Hello");
                    assert_eq!(capitalize("hELLO"), "Hello");
                })
                .it("handles the empty string", || assert_eq!(capitalize(""), ""))
                .it("handles a single character", || {
                    assert_eq!(capitalize("a"), "A");
                    assert_eq!(capitalize("A"), "A");
                }),
        )
        .describe(
            Suite::new("word_count")
                .it("counts words", || {
                    assert_eq!(word_count("hello world"), 2);
                    assert_eq!(word_count("one two three four"), 4);
                })
                .it("ignores extra whitespace", || {
                    assert_eq!(word_count("  hello   world  "), 2);
                    assert_eq!(word_count("   one    "), 1);
                })
                .it("counts nothing in blank input", || {
                    assert_eq!(word_count(""), 0);
                    assert_eq!(word_count("   "), 0);
                })
                .it("counts a single word", || assert_eq!(word_count("hello"), 1)),
        )
        .describe(
            Suite::new("truncate")
                .it("shortens long input", || {
                    assert_eq!(truncate("Hello World", 8, DEFAULT_TRUNCATE_SUFFIX), "Hello...");
                })
                .it("leaves short input alone", || {
                    assert_eq!(truncate("Hello", 10, DEFAULT_TRUNCATE_SUFFIX), "Hello");
                })
                .it("supports a custom suffix", || {
                    assert_eq!(truncate("Hello World", 8, "..."), "Hello...");
                    assert_eq!(truncate("Hello World", 8, " [more]"), "H [more]");
                })
                .it("keeps input exactly at the limit", || {
                    assert_eq!(truncate("Hello", 5, DEFAULT_TRUNCATE_SUFFIX), "Hello");
                }),
        )
        .describe(
            Suite::new("is_palindrome")
                .it("recognises simple palindromes", || {
                    assert!(is_palindrome("racecar"));
                    assert!(is_palindrome("madam"));
                    assert!(is_palindrome("level"));
                })
                .it("rejects other words", || {
                    assert!(!is_palindrome("hello"));
                    assert!(!is_palindrome("world"));
                })
                .it("ignores case", || {
                    assert!(is_palindrome("Racecar"));
                    assert!(is_palindrome("RaceCar"));
                })
                .it("ignores spaces and punctuation", || {
                    assert!(is_palindrome("A man a plan a canal Panama"));
                    assert!(!is_palindrome("race a car"));
                })
                .it("accepts one character and the empty string", || {
                    assert!(is_palindrome("a"));
                    assert!(is_palindrome(""));
                }),
        )
        .describe(
            Suite::new("camel_to_snake")
                .it("converts camelCase", || {
                    assert_eq!(camel_to_snake("helloWorld"), "hello_world");
                    assert_eq!(camel_to_snake("firstName"), "first_name");
                })
                .it("splits every uppercase letter", || {
                    assert_eq!(camel_to_snake("myHTMLParser"), "my_h_t_m_l_parser");
                })
                .it("leaves lowercase input alone", || assert_eq!(camel_to_snake("hello"), "hello"))
                .it("handles the empty string", || assert_eq!(camel_to_snake(""), "")),
        )
        .describe(
            Suite::new("combined")
                .it("chains capitalize and reverse", || {
                    assert_eq!(reverse(&capitalize("hello")), "olleH");
                })
                .it("counts then truncates", || {
                    let text = "  Hello World  ";
                    assert_eq!(word_count(text), 2);
                    assert_eq!(truncate(text.trim(), 8, DEFAULT_TRUNCATE_SUFFIX), "Hello...");
                }),
        )
        .describe(
            Suite::new("large input")
                .it("reverses a long string", || {
                    let reversed = reverse(&"a".repeat(10_000));
                    assert_eq!(reversed.len(), 10_000);
                    assert!(reversed.starts_with('a'));
                })
                .it("counts many words", || {
                    let words = "word ".repeat(1000);
                    assert_eq!(word_count(words.trim()), 1000);
                }),
        )
}
