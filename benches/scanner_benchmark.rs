use std::{fs, sync::LazyLock, time::Duration};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lexmap::{rules, PatternSpec, Scanner, ScannerBuilder, TextTranslator, Transformer};

static SCANNER_INPUT: LazyLock<String> = LazyLock::new(|| {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/script.input");
    fs::read_to_string(path).unwrap().repeat(200)
});

static PATTERNS: LazyLock<Vec<PatternSpec>> = LazyLock::new(|| {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/script.json");
    let file = fs::File::open(path).unwrap();
    serde_json::from_reader(file).unwrap()
});

static SCANNER: LazyLock<Scanner> = LazyLock::new(|| {
    ScannerBuilder::new()
        .add_patterns(&PATTERNS)
        .build()
        .unwrap()
});

static TRANSLATOR: LazyLock<TextTranslator> = LazyLock::new(|| {
    let scanner = ScannerBuilder::new()
        .add_patterns(&PATTERNS)
        .build()
        .unwrap();
    let mut transformer = Transformer::new(rules::escaped());
    transformer
        .add(
            ["comment", "string", "keyword", "number"],
            rules::wrap("span", true),
        )
        .add(["name", "punct", "ws"], rules::lexeme());
    TextTranslator::new(scanner, transformer)
});

fn builder_benchmark(c: &mut Criterion) {
    c.bench_function("builder_benchmark", |b| {
        b.iter(|| {
            black_box(
                ScannerBuilder::new()
                    .add_patterns(&PATTERNS)
                    .build()
                    .unwrap(),
            );
        });
    });
}

fn scanner_benchmark(c: &mut Criterion) {
    c.bench_function("scanner_benchmark", |b| {
        b.iter(|| {
            // Create a token iterator
            let tokens = SCANNER.iter_tokens(&SCANNER_INPUT);
            // Consume all tokens
            for t in tokens {
                black_box(t.unwrap());
            }
        });
    });
}

fn translator_benchmark(c: &mut Criterion) {
    c.bench_function("translator_benchmark", |b| {
        b.iter(|| {
            black_box(TRANSLATOR.translate(&SCANNER_INPUT).unwrap());
        });
    });
}

criterion_group! {
    name = benchesscanner;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = scanner_benchmark, translator_benchmark
}

criterion_group! {
    name = benchesbuilder;
    config = Criterion::default();
    targets = builder_benchmark
}

criterion_main!(benchesscanner, benchesbuilder);
