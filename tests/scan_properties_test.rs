// Tests of the properties every token stream has, independent of the registered patterns.
// Run with `cargo test --test scan_properties_test`

use std::sync::LazyLock;

use lexmap::{token, Context, OwnedToken, PatternSpec, Scanner, ScannerBuilder, Token};

static SCANNER: LazyLock<Scanner> = LazyLock::new(|| {
    ScannerBuilder::new()
        .add_patterns(&[
            PatternSpec::new("comment", r"#[^\n]*"),
            PatternSpec::new("number", r"\d+"),
            PatternSpec::new("name", r"[a-z]\w*"),
            PatternSpec::new("ws", r"\s+"),
        ])
        .build()
        .unwrap()
});

const SOURCES: &[&str] = &[
    "",
    "a",
    "x1 = 42 # answer\n",
    "?? ¿qué? 12€",
    "\n\n\t",
    "tail#",
];

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scan<'a>(scanner: &'a Scanner, source: &'a str) -> Vec<Token<'a>> {
    scanner
        .iter_tokens(source)
        .collect::<lexmap::Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn start_and_end_frame_every_stream() {
    init();
    for source in SOURCES {
        let tokens = scan(&SCANNER, source);
        let first = tokens.first().unwrap();
        let last = tokens.last().unwrap();
        assert_eq!((first.token_type(), first.text(), first.position()), (token::START, "", 0));
        assert_eq!(
            (last.token_type(), last.text(), last.position()),
            (token::END, "", source.len())
        );
        assert_eq!(tokens.iter().filter(|t| t.is(token::START)).count(), 1);
        assert_eq!(tokens.iter().filter(|t| t.is(token::END)).count(), 1);
    }
}

#[test]
fn tokens_partition_the_source() {
    init();
    for source in SOURCES {
        let tokens = scan(&SCANNER, source);
        let mut cursor = 0;
        for token in &tokens[1..tokens.len() - 1] {
            assert_eq!(token.position(), cursor, "Gap or overlap before {}", token);
            assert!(!token.is_empty(), "Unexpected empty token {}", token);
            if token.is(token::UNMATCHED) {
                assert_eq!(token.text().chars().count(), 1);
            }
            cursor = token.end_position();
        }
        assert_eq!(cursor, source.len());
        let text = tokens.iter().map(|t| t.text()).collect::<String>();
        assert_eq!(&text, source);
    }
}

#[test]
fn positions_never_decrease() {
    init();
    for source in SOURCES {
        let tokens = scan(&SCANNER, source);
        assert!(tokens
            .windows(2)
            .all(|w| w[0].end_position() <= w[1].position()));
    }
}

#[test]
fn first_registered_pattern_wins() {
    init();
    let mut scanner = Scanner::new();
    scanner
        .add_regex("short", "a")
        .and_then(|s| s.add_regex("long", "aaa"))
        .unwrap();
    let types = scan(&scanner, "aaa")
        .iter()
        .map(|t| t.token_type())
        .collect::<Vec<_>>();
    assert_eq!(types, ["(start)", "short", "short", "short", "(end)"]);
}

#[test]
fn always_empty_pattern_terminates() {
    init();
    let mut scanner = Scanner::new();
    scanner.add_regex("nothing", "").unwrap();
    let tokens = scan(&scanner, "abc")
        .into_iter()
        .map(OwnedToken::from)
        .collect::<Vec<_>>();
    let expected: Vec<OwnedToken> = vec![
        ("(start)", "", 0).into(),
        ("nothing", "", 0).into(),
        ("(unmatched)", "a", 0).into(),
        ("nothing", "", 1).into(),
        ("(unmatched)", "b", 1).into(),
        ("nothing", "", 2).into(),
        ("(unmatched)", "c", 2).into(),
        ("(end)", "", 3).into(),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn context_is_threaded_through_matchers_and_hook() {
    init();
    let mut scanner = Scanner::new();
    // A procedural matcher that only accepts a closing bracket if one was opened before.
    scanner
        .add_fn("open", |source: &str, offset: usize, context: &mut Context| {
            if source[offset..].starts_with('(') {
                *context.get_or_insert_with("depth", || 0usize) += 1;
                Ok(Some((offset..offset + 1).into()))
            } else {
                Ok(None)
            }
        })
        .and_then(|s| {
            s.add_fn("close", |source: &str, offset: usize, context: &mut Context| {
                match context.get_mut::<usize>("depth") {
                    Some(depth) if *depth > 0 && source[offset..].starts_with(')') => {
                        *depth -= 1;
                        Ok(Some((offset..offset + 1).into()))
                    }
                    _ => Ok(None),
                }
            })
        })
        .unwrap();
    scanner.set_on_match(|token: &Token<'_>, context: &mut Context| {
        context
            .get_or_insert_with("seen", Vec::<String>::new)
            .push(token.token_type().to_string());
    });

    let mut context = Context::new();
    let count = scanner.iter_tokens_with(")(())", &mut context).count();
    assert_eq!(count, 7);
    assert_eq!(context.get::<usize>("depth"), Some(&0));
    assert_eq!(
        context.get::<Vec<String>>("seen").unwrap(),
        &["(unmatched)", "open", "open", "close", "close"]
    );
}

#[test]
fn scanner_is_shared_between_threads() {
    init();
    let handles = SOURCES
        .iter()
        .map(|source| std::thread::spawn(move || scan(&SCANNER, source).len()))
        .collect::<Vec<_>>();
    for (handle, source) in handles.into_iter().zip(SOURCES) {
        assert_eq!(handle.join().unwrap(), scan(&SCANNER, source).len());
    }
}
