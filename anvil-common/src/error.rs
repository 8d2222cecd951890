//! Error types for the anvil crates.

use thiserror::Error;

/// Main error type for anvil operations.
///
/// Rule violations and fixture failures are NOT errors; they are findings
/// and outcomes. This type covers the driver-fatal conditions that make a
/// whole run meaningless.
#[derive(Debug, Error)]
pub enum AnvilError {
    /// IO error during file or stream operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The path handed to the driver does not exist or is not a directory.
    #[error("Plugin path does not exist or is not a directory: {0}")]
    InvalidPluginPath(String),
}
