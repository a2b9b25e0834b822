//! Child process environment

use std::collections::HashMap;
use std::ffi::OsString;

/// Variable controlling the console encoding of Parasoft tools
pub const CONSOLE_ENCODING_VAR: &str = "PARASOFT_CONSOLE_ENCODING";

/// Encoding used when the caller did not choose one
pub const DEFAULT_CONSOLE_ENCODING: &str = "utf-8";

/// Complete environment of a spawned process. Names and values need not be
/// valid Unicode.
pub type Environment = HashMap<OsString, OsString>;

/// Build the environment for a SOAtest process.
///
/// Every entry of `base` is kept. [`CONSOLE_ENCODING_VAR`] is added with
/// [`DEFAULT_CONSOLE_ENCODING`] unless a variable with the same name, compared
/// case-insensitively, is already present.
pub fn build_environment<I, K, V>(base: I) -> Environment
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<OsString>,
    V: Into<OsString>,
{
    let mut env: Environment = base
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let defined = env
        .keys()
        .any(|name| name.to_string_lossy().eq_ignore_ascii_case(CONSOLE_ENCODING_VAR));
    if !defined {
        env.insert(CONSOLE_ENCODING_VAR.into(), DEFAULT_CONSOLE_ENCODING.into());
    }

    env
}
