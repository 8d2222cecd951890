//! Small helpers shared by the rule modules.

use std::path::{Path, PathBuf};

/// Directory entries sorted by path. Listing order is platform-dependent;
/// finding order must not be.
pub(crate) fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|rd| rd.flatten().map(|e| e.path()).collect())
        .unwrap_or_default();
    entries.sort();
    entries
}

/// File name of a path as a lossy string.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Path relative to the plugin root as a lossy string, for finding sources.
pub(crate) fn relative(path: &Path, plugin_root: &Path) -> String {
    path.strip_prefix(plugin_root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Truncate a string to at most `max` characters, on a char boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
