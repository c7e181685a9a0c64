//! `.env` scanner, parser, expander, and formatter.
//!
//! Parses `KEY=VALUE` files with optional `export` prefixes, single and
//! double quoted values, inline comments, escape sequences, and
//! `$VAR` / `${VAR}` expansion into a variable mapping, and serializes
//! mappings back into canonical text.
//!
//! # Quick start
//!
//! ## Parse a document
//!
//! ```
//! use dotenv_rs::parse;
//!
//! let input = "export HOST=localhost\nURL=\"http://${HOST}:8080\" # api\n";
//! let env = parse(input).unwrap();
//! assert_eq!(env["URL"], "http://localhost:8080");
//! ```
//!
//! ## Serialize a mapping
//!
//! ```
//! use std::collections::HashMap;
//! use dotenv_rs::format;
//!
//! let mut env = HashMap::new();
//! env.insert("GREETING".to_string(), "hello world".to_string());
//! env.insert("A".to_string(), "1".to_string());
//! assert_eq!(format(&env), "A=1\nGREETING=\"hello world\"\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use std::path::PathBuf;

pub mod binder;
pub mod convert;
pub mod env;
pub mod expand;
pub mod formatter;
pub mod line;
pub mod loader;
pub mod parser;
mod scanner;

pub use binder::{BindError, Binder, Field};
pub use convert::{ConversionError, EnvValue, format_duration, parse_duration};
pub use env::{EnvError, EnvironmentAccessor, MemoryEnv, ProcessEnv, apply};
pub use expand::expand;
pub use formatter::{format, quote_value};
pub use line::{ParsedLine, QuoteContext, Span};
pub use loader::{load, load_and_apply, load_from_reader, write};
pub use parser::{EnvMap, ParseError, ParseErrorKind, Parser, parse};

/// Unified error type for loading and applying `.env` files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input text is malformed.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// A file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A stream could not be read.
    #[error("failed to read data: {0}")]
    Read(#[source] std::io::Error),
    /// A variable could not be applied to the environment.
    #[error("{0}")]
    Env(#[from] EnvError),
}

/// Parse `.env` text in one step.
///
/// Alias of [`parse`], mirroring [`load`] for in-memory input.
pub fn parse_str(input: &str) -> Result<EnvMap, Error> {
    Ok(parse(input)?)
}
