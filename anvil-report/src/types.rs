//! Finding types: severity, the finding record, and the summary counts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Severity level for a finding.
///
/// ERROR blocks (drives the exit code), WARN is advisory, INFO is
/// informational. The uppercase wire spelling is a stable contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warn,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warn => write!(f, "WARN"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// One observation from a validation rule.
///
/// Immutable once created. Findings are never merged or deduplicated:
/// repeated violations of the same rule produce repeated findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Dot-namespaced rule and sub-case identifier, stable across runs.
    pub check_id: String,
    pub severity: Severity,
    /// Human-readable description of the observation.
    pub message: String,
    /// Free-form evidence (file path, offending line, ...). Keys are
    /// check-specific; insertion order is preserved in serialization.
    pub sources: IndexMap<String, String>,
}

/// Per-severity finding counts. Severities with zero findings still appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub error: usize,
    pub warn: usize,
    pub info: usize,
}
