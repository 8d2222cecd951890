//! Lenient JSON file loading.

use std::path::Path;

/// Whether the file at `path` carries any executable bit.
///
/// On non-Unix platforms there is no executable bit; existence suffices.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Load a JSON file, returning `None` if it is missing or malformed.
///
/// Callers that need to distinguish "absent" from "broken" check
/// `path.exists()` themselves; most rules treat both as the same
/// non-fatal condition.
pub fn load_json_file(path: &Path) -> Option<serde_json::Value> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "malformed JSON file");
            None
        }
    }
}
