//! Serializes a variable mapping back into canonical `.env` text.
//!
//! Keys are written in sorted order, one assignment per line, so the
//! output is stable across runs and re-parses to the same mapping.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::scanner::is_valid_key;

/// Format a mapping as `.env` text.
///
/// Keys are written as-is and must be valid variable names: an ASCII
/// letter or `_`, then letters, digits, or `_`. Any other key produces
/// text that does not parse, and panics in debug builds.
#[must_use]
pub fn format(env: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = env.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        format_entry(&mut out, key, &env[key]);
    }
    out
}

fn format_entry(out: &mut String, key: &str, value: &str) {
    debug_assert!(is_valid_key(key), "invalid key {key:?}");
    let _ = writeln!(out, "{key}={}", quote_value(value));
}

/// Whether `value` must be quoted to survive a re-parse unchanged.
#[must_use]
pub fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r' | '"' | '\'' | '\\' | '#' | '$'))
}

/// Render `value` as it should appear on the right of `=`.
///
/// Plain values are returned unchanged. Values holding `$` are
/// single-quoted when possible so they are not expanded on re-parse;
/// everything else that needs quoting is double-quoted and escaped.
#[must_use]
pub fn quote_value(value: &str) -> String {
    if !needs_quoting(value) {
        return value.to_owned();
    }

    if value.contains('$') && !value.chars().any(|ch| ch == '\'' || ch.is_control()) {
        return format!("'{value}'");
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn empty_map() {
        assert_eq!(format(&HashMap::new()), "");
    }

    #[test]
    fn sorted_keys() {
        let out = format(&map(&[("B", "2"), ("A", "1"), ("C", "3")]));
        assert_eq!(out, "A=1\nB=2\nC=3\n");
    }

    #[test]
    fn empty_value_unquoted() {
        assert_eq!(format(&map(&[("EMPTY", "")])), "EMPTY=\n");
    }

    #[test]
    fn spaces_are_quoted() {
        assert_eq!(quote_value("hello world"), "\"hello world\"");
    }

    #[test]
    fn escapes_in_double_quotes() {
        assert_eq!(
            quote_value("a\\b\"c\nd\te\rf"),
            "\"a\\\\b\\\"c\\nd\\te\\rf\""
        );
    }

    #[test]
    fn hash_is_quoted() {
        assert_eq!(quote_value("a#b"), "\"a#b\"");
    }

    #[test]
    fn dollar_prefers_single_quotes() {
        assert_eq!(quote_value("$HOME/bin"), "'$HOME/bin'");
    }

    #[test]
    fn dollar_with_single_quote_falls_back_to_double() {
        assert_eq!(quote_value("it's $5"), "\"it's $5\"");
    }

    #[test]
    fn plain_values_untouched() {
        assert!(!needs_quoting("postgres://localhost:5432/db"));
        assert_eq!(quote_value("a=b"), "a=b");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "invalid key \"A-B\"")]
    fn invalid_key_panics_in_debug() {
        let _ = format(&map(&[("A-B", "1")]));
    }
}
