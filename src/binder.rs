//! Declarative mapping between a record type and environment variables.
//!
//! Each field is described once with its variable name, options, and a pair
//! of accessor functions. The value type picks its [`EnvValue`] conversion
//! at compile time, so no runtime type inspection is involved.
//!
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//! use dotenv_rs::{Binder, Field};
//!
//! #[derive(Default)]
//! struct Config {
//!     host: String,
//!     port: u16,
//!     timeout: Duration,
//! }
//!
//! let binder = Binder::new()
//!     .prefix("APP_")
//!     .field(Field::new("HOST", |c: &Config| &c.host, |c| &mut c.host).required())
//!     .field(Field::new("PORT", |c: &Config| &c.port, |c| &mut c.port).default("8080"))
//!     .field(Field::new("TIMEOUT", |c: &Config| &c.timeout, |c| &mut c.timeout));
//!
//! let env: HashMap<String, String> =
//!     [("APP_HOST".to_owned(), "db.local".to_owned())].into();
//! let mut config = Config::default();
//! binder.decode(&env, &mut config).unwrap();
//! assert_eq!(config.host, "db.local");
//! assert_eq!(config.port, 8080);
//! ```

use std::collections::HashMap;

use crate::convert::{ConversionError, EnvValue};
use crate::env::EnvironmentAccessor;

/// Error produced while binding variables to a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// A required variable is not set and has no default.
    #[error("required environment variable {key} is not set")]
    RequiredMissing { key: String },
    /// A variable is set but does not convert to the field's type.
    #[error("failed to convert environment variable {key}: {source}")]
    ConversionFailed {
        key: String,
        #[source]
        source: ConversionError,
    },
}

type Decoder<T> = Box<dyn Fn(&mut T, &str) -> Result<(), ConversionError>>;
type Encoder<T> = Box<dyn Fn(&T) -> String>;

/// Description of one record field bound to one variable.
pub struct Field<T> {
    key: String,
    required: bool,
    default: Option<String>,
    decode: Decoder<T>,
    encode: Encoder<T>,
}

impl<T: 'static> Field<T> {
    /// Describe a field read and written through `get` / `get_mut`.
    #[must_use]
    pub fn new<V: EnvValue + 'static>(
        key: &str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self {
            key: key.to_owned(),
            required: false,
            default: None,
            decode: Box::new(move |target: &mut T, raw: &str| {
                *get_mut(target) = V::from_env(raw)?;
                Ok(())
            }),
            encode: Box::new(move |source: &T| get(source).to_env()),
        }
    }
}

impl<T> Field<T> {
    /// Fail decoding when the variable is not set.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Use `literal` when the variable is not set.
    ///
    /// An empty literal is treated as no default.
    #[must_use]
    pub fn default(mut self, literal: &str) -> Self {
        self.default = (!literal.is_empty()).then(|| literal.to_owned());
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("required", &self.required)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Field-descriptor table for a record type.
#[derive(Debug)]
pub struct Binder<T> {
    prefix: String,
    fields: Vec<Field<T>>,
}

impl<T> Default for Binder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Binder<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: String::new(),
            fields: Vec::new(),
        }
    }

    /// Prepend `prefix` to every variable name.
    ///
    /// Prefixed names must still be valid variable names for
    /// [`format`](crate::format) output to parse.
    #[must_use]
    pub fn prefix(mut self, prefix: &str) -> Self {
        prefix.clone_into(&mut self.prefix);
        self
    }

    /// Add a field.
    #[must_use]
    pub fn field(mut self, field: Field<T>) -> Self {
        self.fields.push(field);
        self
    }

    /// Variable names this binder reads and writes, prefix included.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.fields.iter().map(|f| self.full_key(f)).collect()
    }

    fn full_key(&self, field: &Field<T>) -> String {
        format!("{}{}", self.prefix, field.key)
    }

    /// Populate `target` from `env`.
    ///
    /// Fields are processed in the order they were added. A variable that
    /// is not set and has neither a default nor `required` leaves its
    /// field untouched.
    ///
    /// # Errors
    ///
    /// Returns the first `BindError` encountered.
    pub fn decode<E: EnvironmentAccessor + ?Sized>(
        &self,
        env: &E,
        target: &mut T,
    ) -> Result<(), BindError> {
        for field in &self.fields {
            let key = self.full_key(field);
            let raw = match env.get(&key) {
                Some(raw) => raw,
                None if field.required => return Err(BindError::RequiredMissing { key }),
                None => match &field.default {
                    Some(default) => default.clone(),
                    None => continue,
                },
            };

            (field.decode)(target, &raw)
                .map_err(|source| BindError::ConversionFailed { key, source })?;
        }
        Ok(())
    }

    /// Render `source` as a variable mapping.
    ///
    /// Fields that render to an empty string are omitted.
    #[must_use]
    pub fn encode(&self, source: &T) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter_map(|field| {
                let value = (field.encode)(source);
                (!value.is_empty()).then(|| (self.full_key(field), value))
            })
            .collect()
    }
}
