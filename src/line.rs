/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// How a value was written on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteContext {
    /// Bare value, terminated by a newline or `#`.
    Unquoted,
    /// Single-quoted value (`'...'`), taken literally.
    SingleQuoted,
    /// Double-quoted value (`"..."`) with backslash escapes.
    DoubleQuoted,
}

impl QuoteContext {
    /// Whether `$VAR` references in a value of this kind are expanded.
    #[must_use]
    pub const fn allows_expansion(self) -> bool {
        !matches!(self, Self::SingleQuoted)
    }
}

/// A single `KEY=value` assignment read from one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub key: String,
    pub value: String,
    pub quote: QuoteContext,
    /// Position of the first byte of the key.
    pub span: Span,
}

impl ParsedLine {
    /// Whether the raw value is eligible for variable expansion.
    #[must_use]
    pub const fn allows_expansion(&self) -> bool {
        self.quote.allows_expansion()
    }
}
