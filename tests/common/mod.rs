#![allow(dead_code)]

use std::collections::HashMap;

use dotenv_rs::{EnvMap, format, parse};

/// Build a mapping from literal pairs.
pub fn map(pairs: &[(&str, &str)]) -> EnvMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

/// Parse `input`, panicking with the error on failure.
pub fn parse_ok(input: &str) -> EnvMap {
    parse(input).unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input}"))
}

/// Helper: assert `input` parses to exactly `expected`.
pub fn assert_parses_to(input: &str, expected: &[(&str, &str)]) {
    let env = parse_ok(input);
    assert_eq!(
        env,
        map(expected),
        "mapping mismatch\n--- input ---\n{input}"
    );
}

/// Helper: format a mapping, parse it back, assert equality.
pub fn assert_map_roundtrip(original: &HashMap<String, String>) {
    let formatted = format(original);
    let parsed = parse(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e}\n\
             --- formatted ---\n{formatted}"
        )
    });
    assert_eq!(
        original, &parsed,
        "round-trip mismatch\n--- formatted ---\n{formatted}"
    );
}

/// Helper: formatting the parse of `input` reproduces `input`.
pub fn roundtrip(input: &str) {
    let output = format(&parse_ok(input));
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}
