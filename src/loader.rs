//! Reading `.env` files and streams, and writing mappings back to disk.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::Error;
use crate::env::{EnvironmentAccessor, apply};
use crate::formatter::format;
use crate::parser::{EnvMap, parse};

/// Read and parse the `.env` file at `path`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read and `Error::Parse` if its
/// contents are malformed.
pub fn load(path: impl AsRef<Path>) -> Result<EnvMap, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let env = parse(&content)?;
    tracing::debug!(path = %path.display(), entries = env.len(), "loaded env file");
    Ok(env)
}

/// Read and parse `.env` text from `reader`.
///
/// # Errors
///
/// Returns `Error::Read` if reading fails and `Error::Parse` if the text is
/// malformed.
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<EnvMap, Error> {
    let mut content = String::new();
    reader.read_to_string(&mut content).map_err(Error::Read)?;
    Ok(parse(&content)?)
}

/// Load the file at `path` and write every entry into `env`.
///
/// # Errors
///
/// Returns any load error, or the first `EnvError` from `env`.
pub fn load_and_apply<E: EnvironmentAccessor + ?Sized>(
    path: impl AsRef<Path>,
    env: &mut E,
) -> Result<(), Error> {
    let vars = load(path)?;
    apply(&vars, env)?;
    Ok(())
}

/// Write `env` to `path` in canonical form, replacing the file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be written.
pub fn write(path: impl AsRef<Path>, env: &EnvMap) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, format(env)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), entries = env.len(), "wrote env file");
    Ok(())
}
