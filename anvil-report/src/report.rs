//! The report accumulator and its machine-readable serialization.

use indexmap::IndexMap;
use serde::Serialize;

use anvil_common::TOOL_NAME;

use crate::types::{Finding, Severity, Summary};

/// The ordered collection of findings for one validation run.
///
/// Created once per invocation, populated by rule collaborators, read
/// exactly once by the driver to emit output and an exit code. Rules may
/// only append; nothing mutates a finding after it is added.
#[derive(Debug)]
pub struct Report {
    plugin_path: String,
    findings: Vec<Finding>,
}

/// Wire document for machine consumers. Field names, nesting, and the
/// ERROR/WARN/INFO vocabulary are a stable contract.
#[derive(Debug, Serialize)]
struct SerializedReport<'a> {
    tool: &'static str,
    version: &'static str,
    plugin_path: &'a str,
    findings: &'a [Finding],
    summary: Summary,
    exit_code: i32,
}

impl Report {
    /// Create an empty report for the given plugin root.
    pub fn new(plugin_path: impl Into<String>) -> Self {
        Self {
            plugin_path: plugin_path.into(),
            findings: Vec::new(),
        }
    }

    /// The plugin root this report covers.
    pub fn plugin_path(&self) -> &str {
        &self.plugin_path
    }

    /// The findings in append order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Append a finding. Cannot fail; `check_id` is not validated and
    /// `sources` is stored as given.
    pub fn add(
        &mut self,
        check_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        sources: &[(&str, &str)],
    ) {
        let sources: IndexMap<String, String> = sources
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.add_with_sources(check_id, severity, message, sources);
    }

    /// Append a finding with an already-built sources mapping. Used by
    /// rules that adopt findings from external tools.
    pub fn add_with_sources(
        &mut self,
        check_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        sources: IndexMap<String, String>,
    ) {
        self.findings.push(Finding {
            check_id: check_id.into(),
            severity,
            message: message.into(),
            sources,
        });
    }

    /// Append an ERROR finding.
    pub fn error(
        &mut self,
        check_id: impl Into<String>,
        message: impl Into<String>,
        sources: &[(&str, &str)],
    ) {
        self.add(check_id, Severity::Error, message, sources);
    }

    /// Append a WARN finding.
    pub fn warn(
        &mut self,
        check_id: impl Into<String>,
        message: impl Into<String>,
        sources: &[(&str, &str)],
    ) {
        self.add(check_id, Severity::Warn, message, sources);
    }

    /// Append an INFO finding.
    pub fn info(
        &mut self,
        check_id: impl Into<String>,
        message: impl Into<String>,
        sources: &[(&str, &str)],
    ) {
        self.add(check_id, Severity::Info, message, sources);
    }

    /// Per-severity counts; zero counts are included.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for finding in &self.findings {
            match finding.severity {
                Severity::Error => summary.error += 1,
                Severity::Warn => summary.warn += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    }

    /// True iff any ERROR-severity finding exists.
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    /// 1 iff any ERROR exists, else 0. A pure function of the findings.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    /// Serialize the full report as the stable machine-readable document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&SerializedReport {
            tool: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
            plugin_path: &self.plugin_path,
            findings: &self.findings,
            summary: self.summary(),
            exit_code: self.exit_code(),
        })
    }
}
