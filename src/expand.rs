//! `$VAR` and `${VAR}` substitution against previously defined entries.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BRACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("braced reference pattern is valid")
});

static BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("bare reference pattern is valid"));

/// Expand variable references in `value` using `env`.
///
/// `${NAME}` references are resolved first, then `$NAME` references in the
/// result. Unknown names are left as written. Substituted text is not
/// scanned again by the pass that inserted it.
#[must_use]
pub fn expand(value: &str, env: &HashMap<String, String>) -> String {
    let braced = substitute(&BRACED, value, env);
    substitute(&BARE, &braced, env)
}

fn substitute(pattern: &Regex, input: &str, env: &HashMap<String, String>) -> String {
    pattern
        .replace_all(input, |caps: &Captures<'_>| match env.get(&caps[1]) {
            Some(resolved) => {
                tracing::trace!(name = &caps[1], "expanded reference");
                resolved.clone()
            }
            None => caps[0].to_owned(),
        })
        .into_owned()
}
