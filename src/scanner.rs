use crate::line::Span;
use crate::parser::{ParseError, ParseErrorKind};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Returns `true` if `ch` may start a variable name.
#[must_use]
pub const fn is_key_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Returns `true` if `ch` may appear after the first byte of a variable name.
#[must_use]
pub const fn is_key_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

/// Returns `true` if `key` is a complete, valid variable name.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    let mut bytes = key.bytes();
    bytes.next().is_some_and(is_key_start) && bytes.all(is_key_char)
}

/// Byte cursor over `.env` source text.
///
/// `line` and `col` always describe the next unread byte. All scans are
/// bounds-checked: reading past the end yields `None` instead of panicking.
pub struct Scanner<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        let input = text.as_bytes();
        let start = if input.starts_with(UTF8_BOM) {
            UTF8_BOM.len()
        } else {
            0
        };
        Self {
            text,
            input,
            pos: start,
            line: 1,
            col: 1,
        }
    }

    pub const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    pub fn peek_next(&self) -> Option<u8> {
        self.input.get(self.pos + 1).copied()
    }

    pub fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume an ASCII literal already known to be at the cursor.
    pub fn consume_literal(&mut self, literal: &str) {
        for _ in 0..literal.len() {
            self.advance();
        }
    }

    /// Skip spaces and tabs. Newlines are significant and left alone.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.advance();
        }
    }

    /// Consume everything up to and including the next line feed.
    pub fn skip_to_next_line(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == b'\n' {
                break;
            }
        }
    }

    pub fn parse_key(&mut self) -> Result<&'a str, ParseError> {
        let span = self.span();
        if !self.peek().is_some_and(is_key_start) {
            return Err(ParseError {
                kind: ParseErrorKind::InvalidKey,
                span,
            });
        }

        let start = self.pos;
        while self.peek().is_some_and(is_key_char) {
            self.advance();
        }
        Ok(&self.text[start..self.pos])
    }

    /// Read a bare value up to a line break or `#`.
    ///
    /// The `#` is left unconsumed; the returned flag reports whether one
    /// was found. Trailing spaces and tabs are trimmed.
    pub fn parse_unquoted_value(&mut self) -> (String, bool) {
        let start = self.pos;
        let mut had_comment = false;

        while let Some(ch) = self.peek() {
            match ch {
                b'\n' | b'\r' => break,
                b'#' => {
                    had_comment = true;
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        let value = self.text[start..self.pos].trim_end_matches([' ', '\t']);
        (value.to_owned(), had_comment)
    }

    /// Read a value enclosed in `quote`, which must be at the cursor.
    ///
    /// Backslash escapes are decoded only inside double quotes.
    pub fn parse_quoted_value(&mut self, quote: u8) -> Result<String, ParseError> {
        let start = self.span();
        self.advance(); // opening quote

        let unterminated = || ParseError {
            kind: ParseErrorKind::UnterminatedString,
            span: start,
        };

        let mut value = Vec::new();
        loop {
            match self.peek() {
                None => return Err(unterminated()),
                Some(ch) if ch == quote => {
                    self.advance();
                    break;
                }
                Some(b'\\') if quote == b'"' => {
                    let Some(escaped) = self.peek_next() else {
                        return Err(unterminated());
                    };
                    self.advance();
                    self.advance();
                    match escaped {
                        b'n' => value.push(b'\n'),
                        b't' => value.push(b'\t'),
                        b'r' => value.push(b'\r'),
                        b'\\' | b'"' | b'\'' => value.push(escaped),
                        other => {
                            value.push(b'\\');
                            value.push(other);
                        }
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Ok(String::from_utf8_lossy(&value).into_owned())
    }
}
