//! Human-readable report rendering.
//!
//! Presentation only: nothing in the validation model depends on
//! rendering having occurred.

use colored::Colorize;
use std::fmt::Write;

use crate::report::Report;
use crate::types::{Finding, Severity};

const BANNER: &str = "==================================================";

impl Report {
    /// Render the findings grouped by severity in ERROR, WARN, INFO order.
    ///
    /// An empty report renders the all-clear sentinel. Otherwise each
    /// non-empty severity group gets a banner, one line per finding with
    /// its sources as a comma-joined `key=value` list, and the output ends
    /// with a total line.
    pub fn render_human(&self) -> String {
        let mut output = String::new();

        if self.findings().is_empty() {
            output.push_str("All checks passed.\n");
            return output;
        }

        for severity in [Severity::Error, Severity::Warn, Severity::Info] {
            let group: Vec<&Finding> = self
                .findings()
                .iter()
                .filter(|f| f.severity == severity)
                .collect();
            if group.is_empty() {
                continue;
            }

            let label = match severity {
                Severity::Error => severity.to_string().red().bold(),
                Severity::Warn => severity.to_string().yellow().bold(),
                Severity::Info => severity.to_string().blue().bold(),
            };
            writeln!(output, "\n{}", BANNER).unwrap();
            writeln!(output, "  {} ({})", label, group.len()).unwrap();
            writeln!(output, "{}", BANNER).unwrap();

            for finding in group {
                let sources = if finding.sources.is_empty() {
                    String::new()
                } else {
                    let joined = finding
                        .sources
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!(" ({joined})")
                };
                writeln!(output, "  [{}] {}{}", finding.check_id, finding.message, sources)
                    .unwrap();
            }
        }

        let summary = self.summary();
        writeln!(
            output,
            "\n{} findings: {} error, {} warn, {} info",
            self.findings().len(),
            summary.error,
            summary.warn,
            summary.info
        )
        .unwrap();

        output
    }
}
