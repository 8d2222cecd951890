//! Anvil CLI - command-line interface for the anvil plugin validator.

mod check;
mod cli;
mod test_hooks;

pub use check::run_check;
pub use cli::{Cli, Commands};
pub use test_hooks::run_tests;

use std::path::{Path, PathBuf};

use anvil_common::AnvilError;

/// Canonicalize the target path and require it to be a directory.
///
/// A missing or non-directory target is driver-fatal: the whole run is
/// meaningless, so this aborts instead of producing findings.
pub(crate) fn resolve_plugin_path(path: &Path) -> Result<PathBuf, AnvilError> {
    let canonical = std::fs::canonicalize(path)
        .map_err(|_| AnvilError::InvalidPluginPath(path.display().to_string()))?;
    if !canonical.is_dir() {
        return Err(AnvilError::InvalidPluginPath(path.display().to_string()));
    }
    Ok(canonical)
}
