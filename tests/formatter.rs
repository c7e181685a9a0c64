//! Formatter output and round-trip tests.

mod common;

use common::{assert_map_roundtrip, map, roundtrip};
use dotenv_rs::{format, quote_value};

// -----------------------------------------------------------
// Output shape.
// -----------------------------------------------------------

#[test]
fn format_sorted_output() {
    let out = format(&map(&[("ZED", "z"), ("ALPHA", "a"), ("MID", "m")]));
    assert_eq!(out, "ALPHA=a\nMID=m\nZED=z\n");
}

#[test]
fn format_quotes_special_values() {
    let out = format(&map(&[
        ("SPACE", "a b"),
        ("HASH", "a#b"),
        ("QUOTE", "say \"hi\""),
        ("BACKSLASH", "C:\\dir"),
        ("DOLLAR", "$HOME"),
    ]));
    assert_eq!(
        out,
        "BACKSLASH=\"C:\\\\dir\"\n\
         DOLLAR='$HOME'\n\
         HASH=\"a#b\"\n\
         QUOTE=\"say \\\"hi\\\"\"\n\
         SPACE=\"a b\"\n"
    );
}

#[test]
fn quote_value_escapes_control_characters() {
    assert_eq!(quote_value("a\nb"), "\"a\\nb\"");
    assert_eq!(quote_value("a\tb"), "\"a\\tb\"");
    assert_eq!(quote_value("a\rb"), "\"a\\rb\"");
}

#[test]
fn dollar_with_newline_uses_double_quotes() {
    assert_eq!(quote_value("$A\n"), "\"$A\\n\"");
}

// -----------------------------------------------------------
// Text round-trips: canonical input is reproduced exactly.
// -----------------------------------------------------------

#[test]
fn roundtrip_plain() {
    roundtrip("A=1\nB=2\n");
}

#[test]
fn roundtrip_quoted() {
    roundtrip("MSG=\"hello world\"\nPATH='$HOME/bin'\n");
}

#[test]
fn roundtrip_empty_value() {
    roundtrip("EMPTY=\n");
}

#[test]
fn roundtrip_empty_document() {
    roundtrip("");
}

// -----------------------------------------------------------
// Mapping round-trips.
// -----------------------------------------------------------

#[test]
fn map_roundtrip_special_characters() {
    assert_map_roundtrip(&map(&[
        ("A", "plain"),
        ("B", "with space"),
        ("C", "  leading and trailing  "),
        ("D", "quote \" inside"),
        ("E", "apostrophe ' inside"),
        ("F", "back\\slash"),
        ("G", "hash # inside"),
        ("H", "${A} and $A"),
        ("I", ""),
        ("J", "=starts with equals"),
        ("K", "\"fully quoted\""),
    ]));
}

#[test]
fn map_roundtrip_control_characters() {
    assert_map_roundtrip(&map(&[("A", "line1\nline2"), ("B", "tab\there\r")]));
}
