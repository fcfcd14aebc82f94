/// This file contains match tests of single regex patterns to verify the correctness of the
/// scanner's anchored matching, capture group selection and unmatched recovery.
use lexmap::{token, Scanner};

/// Test data for the match tests.
/// The test data consists of a pattern, the capture group reported as lexeme, an input string,
/// the expected matches, and an optional error message.
#[derive(Debug)]
struct TestData {
    pattern: &'static str,
    group: usize,
    input: &'static str,
    expected: &'static [(&'static str, usize, usize)],
    error_msg: Option<&'static str>,
}

// Macros to easily create a TestData struct.

// Valid pattern, input, and expected matches.
macro_rules! td {
    ($pattern:expr, $input:expr, $expected:expr) => {
        TestData {
            pattern: $pattern,
            group: 0,
            input: $input,
            expected: $expected,
            error_msg: None,
        }
    };
}

// Valid pattern with a capture group as lexeme, input, and expected matches.
macro_rules! tg {
    ($pattern:expr, $group:expr, $input:expr, $expected:expr) => {
        TestData {
            pattern: $pattern,
            group: $group,
            input: $input,
            expected: $expected,
            error_msg: None,
        }
    };
}

// Invalid pattern or group and expected error message.
macro_rules! te {
    ($pattern:expr, $group:expr, $result:expr) => {
        TestData {
            pattern: $pattern,
            group: $group,
            input: "",
            expected: &[],
            error_msg: Some($result),
        }
    };
}

const TEST_DATA: &[TestData] = &[
    td!(r#""#, "", &[]),
    // An empty match is emitted and the character at its position is recovered as unmatched.
    td!(r#""#, "a", &[("", 0, 0)]),
    td!(r#"a"#, "a", &[("a", 0, 1)]),
    td!(r#"\x61"#, "a", &[("a", 0, 1)]),
    td!(r#"aa"#, "aaa", &[("aa", 0, 2)]),
    td!(r#"b"#, "ab", &[("b", 1, 2)]),
    td!(r#"bc"#, "abc", &[("bc", 1, 3)]),
    td!(r#"a|b"#, "abc", &[("a", 0, 1), ("b", 1, 2)]),
    td!(r#"a*"#, "aab", &[("aa", 0, 2), ("", 2, 2)]),
    td!(r#"a+"#, "baab", &[("aa", 1, 3)]),
    td!(r#"a?"#, "ba", &[("", 0, 0), ("a", 1, 2)]),
    td!(r#"(?:ab)+"#, "ababa", &[("abab", 0, 4)]),
    // Leftmost first, not leftmost longest.
    td!(r#"ab|abc"#, "abc", &[("ab", 0, 2)]),
    td!(r#"abc|ab"#, "abc", &[("abc", 0, 3)]),
    td!(r#"\d+"#, "x12y345", &[("12", 1, 3), ("345", 4, 7)]),
    td!(r#"\w+"#, "héllo wörld", &[("héllo", 0, 6), ("wörld", 7, 13)]),
    td!(r#"\s+"#, "a \t\nb", &[(" \t\n", 1, 4)]),
    td!(r#"[a-c]+"#, "abcdcba", &[("abc", 0, 3), ("cba", 4, 7)]),
    td!(r#"[^a-c]+"#, "abcdcba", &[("d", 3, 4)]),
    td!(r#"."#, "a\nb", &[("a", 0, 1), ("b", 2, 3)]),
    td!(r#"(?s)."#, "a\nb", &[("a", 0, 1), ("\n", 1, 2), ("b", 2, 3)]),
    td!(r#"(?i)abc"#, "ABCabc", &[("ABC", 0, 3), ("abc", 3, 6)]),
    // Assertions see the characters before the offset.
    td!(r#"\bfor\b"#, "for forty", &[("for", 0, 3)]),
    td!(r#"for\B"#, "for forty", &[("for", 4, 7)]),
    td!(r#"^a"#, "aa", &[("a", 0, 1)]),
    td!(r#"é"#, "éé", &[("é", 0, 2), ("é", 2, 4)]),
    td!(r#"[αβ]+"#, "αβγ", &[("αβ", 0, 4)]),
    tg!(r#"(a)(b)?"#, 2, "aab", &[("", 0, 0), ("b", 2, 3)]),
    tg!(r#"(if|else)[^a-z]"#, 1, "if(else)", &[("if", 0, 2), ("else", 3, 7)]),
    tg!(r#"x(y)"#, 1, "xy", &[("y", 1, 2)]),
    te!(r#"(?=a)"#, 0, "'(?=a)'"),
    te!(r#"(a)\1"#, 0, "'(a)\\1'"),
    te!(r#"[a"#, 0, "'[a'"),
    te!(r#"a"#, 1, "Capture group 1"),
    te!(r#"(a)"#, 2, "Capture group 2"),
];

#[test]
fn match_test() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (test_number, test_data) in TEST_DATA.iter().enumerate() {
        let mut scanner = Scanner::new();
        let added = scanner
            .add_regex_group("tok", test_data.pattern, test_data.group)
            .map(|_| ());
        match added {
            Ok(()) => {
                assert!(
                    test_data.error_msg.is_none(),
                    "#{}: Parsing regex should fail: {:?}",
                    test_number,
                    test_data,
                );
                // Registration succeeded. Check if the matches are as expected.
                let tokens = scanner
                    .iter_tokens(test_data.input)
                    .collect::<lexmap::Result<Vec<_>>>()
                    .unwrap();
                let matches = tokens
                    .iter()
                    .filter(|t| !t.is_reserved())
                    .collect::<Vec<_>>();
                assert_eq!(
                    matches.len(),
                    test_data.expected.len(),
                    "#{}, Differing matches count {:?}, {:?}",
                    test_number,
                    test_data,
                    matches
                );
                for (matched, (expected_match, expected_start, expected_end)) in
                    matches.iter().zip(test_data.expected.iter())
                {
                    assert_eq!(
                        matched.text(),
                        *expected_match,
                        "#{}: {:?} {:?}",
                        test_number,
                        test_data,
                        matched
                    );
                    assert_eq!(
                        matched.position(),
                        *expected_start,
                        "#{} Match start ",
                        test_number
                    );
                    assert_eq!(
                        matched.end_position(),
                        *expected_end,
                        "#{} Match end ",
                        test_number
                    );
                }
                // The remaining characters are covered by unmatched tokens.
                let unmatched = tokens
                    .iter()
                    .filter(|t| t.is(token::UNMATCHED))
                    .map(|t| t.text().chars().count())
                    .sum::<usize>();
                let matched = matches.iter().map(|t| t.text().chars().count()).sum::<usize>();
                assert!(
                    unmatched + matched <= test_data.input.chars().count(),
                    "#{}: Overlapping tokens",
                    test_number
                );
            }
            Err(e) => {
                // Registration failed. Check if the error message is as expected.
                assert!(
                    test_data.error_msg.is_some(),
                    "#{}: Unexpected error: {}, {:?}",
                    test_number,
                    e,
                    test_data
                );
                assert!(e.is_configuration_error());
                let msg = e.to_string();
                assert!(
                    msg.contains(test_data.error_msg.unwrap()),
                    "#{}:\n'{}'\ndoes not contain\n'{}'",
                    test_number,
                    e,
                    test_data.error_msg.unwrap()
                );
            }
        }
    }
}
