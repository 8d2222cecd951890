//! Cross-repo consistency adapter.
//!
//! Plugins developed inside a fabrica workspace share conventions enforced
//! by `scripts/check_consistency.py` at the workspace root. This rule runs
//! that checker and adopts the findings relevant to the plugin under
//! validation. Outside such a workspace it degrades to a single INFO note.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use tokio::process::Command;

use anvil_common::{run_with_timeout, BoundedRun};
use anvil_report::{Report, Severity};

use crate::util::truncate_chars;

/// Bound on the external consistency checker.
const CHECKER_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn validate(plugin_root: &Path, report: &mut Report) {
    let fabrica_root = match std::env::var_os("FABRICA_ROOT") {
        Some(root) => PathBuf::from(root),
        // Heuristic: plugins sit one level below the workspace root.
        None => plugin_root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| plugin_root.to_path_buf()),
    };

    let script = fabrica_root.join("scripts").join("check_consistency.py");
    if !script.exists() {
        report.info(
            "consistency.no_script",
            "fabrica/scripts/check_consistency.py not found, skipping cross-repo checks",
            &[("fabrica_root", &fabrica_root.to_string_lossy())],
        );
        return;
    }

    let mut command = Command::new("python3");
    command.arg(&script).arg("--json").current_dir(&fabrica_root);

    let (exit_code, stdout, stderr) = match run_with_timeout(command, None, CHECKER_TIMEOUT).await {
        BoundedRun::TimedOut => {
            report.warn(
                "consistency.timeout",
                format!("check_consistency.py timed out ({}s)", CHECKER_TIMEOUT.as_secs()),
                &[],
            );
            return;
        }
        BoundedRun::SpawnError(e) => {
            report.warn(
                "consistency.exec_error",
                format!("Failed to run check_consistency.py: {e}"),
                &[],
            );
            return;
        }
        BoundedRun::Completed {
            exit_code,
            stdout,
            stderr,
        } => (exit_code, stdout, stderr),
    };

    let Ok(findings) = serde_json::from_str::<Vec<serde_json::Value>>(&stdout) else {
        if exit_code != 0 {
            report.warn(
                "consistency.parse_error",
                "Could not parse check_consistency.py output",
                &[("stderr", &truncate_chars(stderr.trim(), 200))],
            );
        }
        return;
    };

    let plugin_name = plugin_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    for finding in &findings {
        if finding.get("plugin").and_then(|v| v.as_str()) != Some(plugin_name.as_str()) {
            continue;
        }
        let raw_severity = finding
            .get("severity")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        let message = finding
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown finding");

        let mut sources = IndexMap::new();
        if let Some(map) = finding.get("sources").and_then(|v| v.as_object()) {
            for (key, value) in map {
                let value = value
                    .as_str()
                    .map(String::from)
                    .unwrap_or_else(|| value.to_string());
                sources.insert(key.clone(), value);
            }
        }

        report.add_with_sources(
            format!("consistency.{}", raw_severity.to_lowercase()),
            map_severity(raw_severity),
            message,
            sources,
        );
    }
}

/// Map the checker's CRITICAL/HIGH/MEDIUM/LOW vocabulary onto anvil
/// severities. Unknown values are informational.
fn map_severity(raw: &str) -> Severity {
    match raw {
        "CRITICAL" | "HIGH" => Severity::Error,
        "MEDIUM" => Severity::Warn,
        "LOW" => Severity::Info,
        _ => Severity::Info,
    }
}
