//! Access to an environment: the process environment or an in-memory map.

use std::collections::HashMap;

use crate::convert::EnvValue;

/// Error produced when a variable cannot be written to an environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    /// Name is empty or contains `=` or NUL.
    #[error("invalid environment variable name {0:?}")]
    InvalidName(String),
    /// Value contains NUL.
    #[error("invalid value for environment variable {0}")]
    InvalidValue(String),
}

/// Narrow get/set/unset interface over an environment.
///
/// The parser and binder only ever see this trait, so they can be driven
/// by an in-memory map in tests.
pub trait EnvironmentAccessor {
    /// Look up a variable.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns `EnvError` if the name or value cannot be stored.
    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvError>;

    /// Remove a variable. Removing an absent variable is not an error.
    ///
    /// # Errors
    ///
    /// Returns `EnvError` if the name is invalid.
    fn unset(&mut self, key: &str) -> Result<(), EnvError>;

    /// Whether a variable is set.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Read a variable converted to `T`.
    ///
    /// Returns `None` when the variable is absent or does not convert.
    fn get_as<T: EnvValue>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        self.get(key).and_then(|raw| T::from_env(&raw).ok())
    }

    /// Read a variable converted to `T`, falling back to `default` when it
    /// is absent or does not convert.
    fn get_or<T: EnvValue>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        self.get_as(key).unwrap_or(default)
    }
}

fn validate_name(key: &str) -> Result<(), EnvError> {
    if key.is_empty() || key.contains(['=', '\0']) {
        return Err(EnvError::InvalidName(key.to_owned()));
    }
    Ok(())
}

/// The environment of the current process.
#[derive(Debug)]
pub struct ProcessEnv {
    _private: (),
}

impl ProcessEnv {
    /// Create an accessor for the process environment.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other threads concurrently read or write
    /// the process environment while this accessor mutates it.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl EnvironmentAccessor for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        if validate_name(key).is_err() {
            return None;
        }
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvError> {
        validate_name(key)?;
        if value.contains('\0') {
            return Err(EnvError::InvalidValue(key.to_owned()));
        }
        // SAFETY: exclusive access was promised when `ProcessEnv::new` was called.
        unsafe { std::env::set_var(key, value) };
        Ok(())
    }

    fn unset(&mut self, key: &str) -> Result<(), EnvError> {
        validate_name(key)?;
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
        Ok(())
    }
}

/// An environment held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn as_map(&self) -> &HashMap<String, String> {
        &self.vars
    }

    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        self.vars
    }
}

impl From<HashMap<String, String>> for MemoryEnv {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}

impl EnvironmentAccessor for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvError> {
        self.vars.set(key, value)
    }

    fn unset(&mut self, key: &str) -> Result<(), EnvError> {
        self.vars.unset(key)
    }
}

impl EnvironmentAccessor for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EnvError> {
        validate_name(key)?;
        self.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn unset(&mut self, key: &str) -> Result<(), EnvError> {
        validate_name(key)?;
        self.remove(key);
        Ok(())
    }
}

/// Write every entry of `vars` into `env`.
///
/// Stops at the first failure; entries already written stay written.
///
/// # Errors
///
/// Returns the first `EnvError` reported by `env`.
pub fn apply<E: EnvironmentAccessor + ?Sized>(
    vars: &HashMap<String, String>,
    env: &mut E,
) -> Result<(), EnvError> {
    for (key, value) in vars {
        env.set(key, value)?;
        tracing::trace!(key = key.as_str(), "applied variable");
    }
    tracing::debug!(count = vars.len(), "applied environment");
    Ok(())
}
