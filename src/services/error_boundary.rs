//! Uniform failure guard for engine and OS entry points.
//!
//! Each entry runs its body through [`guard`]; a failure is logged and
//! replaced by the safe default for that entry.

use tracing::error;

use crate::types::errors::ShellError;

pub fn guard<T, F>(operation: &'static str, fallback: T, body: F) -> T
where
    F: FnOnce() -> Result<T, ShellError>,
{
    guard_with(operation, body, |_| fallback)
}

/// Like [`guard`], with a fallback computed from the error.
pub fn guard_with<T, F, D>(operation: &'static str, body: F, fallback: D) -> T
where
    F: FnOnce() -> Result<T, ShellError>,
    D: FnOnce(&ShellError) -> T,
{
    match body() {
        Ok(value) => value,
        Err(e) => {
            error!(operation, error = %e, "entry point failed, using safe default");
            fallback(&e)
        }
    }
}
