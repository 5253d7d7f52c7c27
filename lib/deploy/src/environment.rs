//! Process environment access.
use std::path::PathBuf;

/// Loads variables from a `.env` file in the current directory or one of its
/// ancestors.
///
/// Variables already present in the process environment are not overridden.
/// Returns the path of the loaded file, or `None` when there is none.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

/// Load the `name` environment variable.
///
/// Unset, empty, and non-unicode values all read as `None`.
#[must_use]
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
