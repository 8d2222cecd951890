//! Fixture discovery.

use std::path::{Path, PathBuf};

/// Find every `fixtures/hooks/*/case.json` under the plugin root.
///
/// A missing fixtures directory is a valid, non-failing state and returns
/// an empty vector. Results are sorted lexicographically by path; the sort
/// order is part of the contract, not a property of the directory listing.
/// Malformed case files are not filtered here; they surface as fail
/// outcomes when executed.
pub fn discover_fixtures(plugin_root: &Path) -> Vec<PathBuf> {
    let fixtures_dir = plugin_root.join("fixtures").join("hooks");
    if !fixtures_dir.is_dir() {
        return Vec::new();
    }

    let mut cases: Vec<PathBuf> = Vec::new();
    if let Ok(entries) = std::fs::read_dir(&fixtures_dir) {
        for entry in entries.flatten() {
            let case = entry.path().join("case.json");
            if case.is_file() {
                cases.push(case);
            }
        }
    }
    cases.sort();
    cases
}
