//! The fixture case format.
//!
//! Every optional field has exactly one documented default, applied once
//! at deserialization. A fixture is read-only after loading.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Default timeout for a hook-script run when the case does not specify one.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

fn default_event() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// One declarative hook-script test case, loaded from `case.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Display label. Defaults to the fixture directory's name.
    #[serde(default)]
    pub name: Option<String>,

    /// Path of the executable under test, relative to the plugin root.
    pub hook_script: String,

    /// Arbitrary payload delivered to the script's stdin as serialized
    /// JSON. Opaque to the engine.
    #[serde(default = "default_event")]
    pub event: serde_json::Value,

    /// Assertions over the observed process outcome.
    #[serde(default)]
    pub expected: Expectations,

    /// Seconds before the script is forcibly terminated.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Extra environment variables overlaid on the inherited environment.
    /// Fixture-declared keys win over inherited ones.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Assertion set for a fixture. An absent field means "no constraint",
/// not "must be empty".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Expectations {
    /// Exact exit code match, when present.
    #[serde(default)]
    pub exit_code: Option<i32>,

    /// Substrings that must all appear on stdout.
    #[serde(default)]
    pub stdout_contains: Vec<String>,

    /// Substrings that must all appear on stderr.
    #[serde(default)]
    pub stderr_contains: Vec<String>,

    /// Substrings that must all be absent from stdout.
    #[serde(default)]
    pub stdout_not_contains: Vec<String>,

    /// Substrings that must all be absent from stderr.
    #[serde(default)]
    pub stderr_not_contains: Vec<String>,
}

impl Fixture {
    /// The label used in outcome messages: the declared `name`, or the
    /// name of the directory containing the case file.
    pub fn display_name(&self, case_path: &Path) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        case_path
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string())
    }
}
