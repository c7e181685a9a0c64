use std::collections::HashMap;
use std::fmt;

use crate::expand::expand;
use crate::line::{ParsedLine, QuoteContext, Span};
use crate::scanner::Scanner;

/// Variable name to value mapping produced by [`parse`].
pub type EnvMap = HashMap<String, String>;

const EXPORT_PREFIX: &str = "export ";

/// Classifies a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Key does not start with an ASCII letter or underscore.
    InvalidKey,
    /// A key was required but none was found.
    MissingVariableName,
    /// The key is not followed by `=`.
    MissingAssignment,
    /// Quoted value never closed before end of input.
    UnterminatedString,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => {
                write!(f, "invalid key, keys must start with a letter or underscore")
            }
            Self::MissingVariableName => write!(f, "expected variable name"),
            Self::MissingAssignment => {
                write!(f, "expected '=' after variable name")
            }
            Self::UnterminatedString => write!(f, "unterminated quoted string"),
        }
    }
}

/// Error produced while parsing `.env` text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    /// 1-based line on which the offending construct began.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }
}

/// Parse `.env` text into a variable mapping.
///
/// Parsing is all-or-nothing: the first malformed line aborts the whole
/// document.
///
/// # Errors
///
/// Returns `ParseError` for invalid keys, missing `=`, or unterminated
/// quoted values.
pub fn parse(input: &str) -> Result<EnvMap, ParseError> {
    Parser::new(input).parse()
}

/// Line-at-a-time `.env` parser.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            scanner: Scanner::new(input),
        }
    }

    /// Whether all input has been consumed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.scanner.is_at_end()
    }

    /// Parse the whole remaining input, expanding references against
    /// entries defined on earlier lines.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered.
    pub fn parse(mut self) -> Result<EnvMap, ParseError> {
        let mut env = EnvMap::new();

        while !self.is_finished() {
            let Some(parsed) = self.parse_line()? else {
                continue;
            };

            let value = if parsed.allows_expansion() && parsed.value.contains('$') {
                expand(&parsed.value, &env)
            } else {
                parsed.value
            };

            env.insert(parsed.key, value);
        }

        tracing::debug!(entries = env.len(), "parsed document");
        Ok(env)
    }

    /// Parse exactly one logical line.
    ///
    /// Returns `Ok(None)` for blank lines and full-line comments.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the line is not a valid assignment.
    pub fn parse_line(&mut self) -> Result<Option<ParsedLine>, ParseError> {
        let s = &mut self.scanner;
        s.skip_whitespace();

        if matches!(s.peek(), None | Some(b'\n' | b'\r' | b'#')) {
            s.skip_to_next_line();
            return Ok(None);
        }

        if s.rest().starts_with(EXPORT_PREFIX) {
            s.consume_literal(EXPORT_PREFIX);
            s.skip_whitespace();
        }

        let span = s.span();
        let key = s.parse_key()?;
        if key.is_empty() {
            return Err(ParseError {
                kind: ParseErrorKind::MissingVariableName,
                span,
            });
        }

        s.skip_whitespace();
        if s.peek() != Some(b'=') {
            return Err(ParseError {
                kind: ParseErrorKind::MissingAssignment,
                span: s.span(),
            });
        }
        s.advance();
        s.skip_whitespace();

        let (value, quote) = match s.peek() {
            Some(b'"') => (s.parse_quoted_value(b'"')?, QuoteContext::DoubleQuoted),
            Some(b'\'') => (s.parse_quoted_value(b'\'')?, QuoteContext::SingleQuoted),
            _ => {
                let (value, had_comment) = s.parse_unquoted_value();
                if had_comment {
                    s.skip_to_next_line();
                }
                (value, QuoteContext::Unquoted)
            }
        };

        s.skip_whitespace();
        if s.peek() == Some(b'#') {
            s.skip_to_next_line();
        }

        Ok(Some(ParsedLine {
            key: key.to_owned(),
            value,
            quote,
            span,
        }))
    }
}
