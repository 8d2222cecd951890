//! The rule-based validation drive loop.

use std::path::Path;

use anvil_common::AnvilError;
use anvil_report::Report;

use crate::resolve_plugin_path;

/// Run every rule against the plugin at `path` and print one report.
///
/// Returns the exit code derived from the report: 1 iff any ERROR finding
/// exists, else 0.
pub async fn run_check(path: &Path, json: bool) -> Result<i32, AnvilError> {
    let plugin_root = resolve_plugin_path(path)?;

    let mut report = Report::new(plugin_root.to_string_lossy());
    anvil_rules::run_all(&plugin_root, &mut report).await;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_human());
    }

    tracing::debug!(
        findings = report.findings().len(),
        exit_code = report.exit_code(),
        "check complete"
    );
    Ok(report.exit_code())
}
