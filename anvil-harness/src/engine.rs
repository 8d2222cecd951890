//! The fixture execution engine.
//!
//! Runs one case at a time as a strict sequence of checks, short-circuiting
//! on the first failure. Every short-circuit is itself the outcome; nothing
//! in here propagates an error to the caller.

use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

use anvil_common::{is_executable, run_with_timeout, BoundedRun, PLUGIN_ROOT_ENV};

use crate::fixture::{Expectations, Fixture};

/// Pass/fail verdict for one fixture, with a one-line diagnostic.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub passed: bool,
    pub message: String,
}

impl CaseOutcome {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// Execute the case at `case_path` against the plugin at `plugin_root`.
///
/// The hook script runs with the inherited environment plus
/// `CLAUDE_PLUGIN_ROOT` pointing at the plugin root, with the fixture's
/// `env` entries overlaid last. The serialized `event` is delivered whole
/// on the script's stdin. The overlay is per-spawn and never leaks into
/// the parent process or sibling fixtures.
pub async fn run_case(plugin_root: &Path, case_path: &Path) -> CaseOutcome {
    let fixture: Fixture = match std::fs::read_to_string(case_path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
    {
        Ok(fixture) => fixture,
        Err(e) => {
            tracing::debug!(case = %case_path.display(), error = %e, "unloadable case file");
            return CaseOutcome::fail("Failed to load case.json");
        }
    };

    let name = fixture.display_name(case_path);

    let script_path = plugin_root.join(&fixture.hook_script);
    if !script_path.exists() {
        return CaseOutcome::fail(format!(
            "{name}: hook_script not found: {}",
            fixture.hook_script
        ));
    }
    if !is_executable(&script_path) {
        return CaseOutcome::fail(format!(
            "{name}: hook_script not executable: {}",
            fixture.hook_script
        ));
    }

    let mut command = Command::new(&script_path);
    command.env(PLUGIN_ROOT_ENV, plugin_root.as_os_str());
    command.envs(&fixture.env);

    let event_json = fixture.event.to_string();
    let timeout = Duration::from_secs(fixture.timeout_seconds);

    match run_with_timeout(command, Some(&event_json), timeout).await {
        BoundedRun::TimedOut => CaseOutcome::fail(format!(
            "{name}: timed out after {}s",
            fixture.timeout_seconds
        )),
        BoundedRun::SpawnError(e) => CaseOutcome::fail(format!("{name}: execution error: {e}")),
        BoundedRun::Completed {
            exit_code,
            stdout,
            stderr,
        } => evaluate(&name, &fixture.expected, exit_code, &stdout, &stderr),
    }
}

/// Evaluate the expectation set in its fixed order, stopping at the first
/// violation: exit code, stdout_contains, stderr_contains,
/// stdout_not_contains, stderr_not_contains.
fn evaluate(
    name: &str,
    expected: &Expectations,
    exit_code: i32,
    stdout: &str,
    stderr: &str,
) -> CaseOutcome {
    if let Some(want) = expected.exit_code {
        if exit_code != want {
            return CaseOutcome::fail(format!(
                "{name}: exit_code expected {want}, got {exit_code}"
            ));
        }
    }

    let required = [
        ("stdout_contains", &expected.stdout_contains, stdout),
        ("stderr_contains", &expected.stderr_contains, stderr),
    ];
    for (field, patterns, stream) in required {
        for pattern in patterns {
            if !stream.contains(pattern.as_str()) {
                return CaseOutcome::fail(format!("{name}: {field}: '{pattern}' not found"));
            }
        }
    }

    let forbidden = [
        ("stdout_not_contains", &expected.stdout_not_contains, stdout),
        ("stderr_not_contains", &expected.stderr_not_contains, stderr),
    ];
    for (field, patterns, stream) in forbidden {
        for pattern in patterns {
            if stream.contains(pattern.as_str()) {
                return CaseOutcome::fail(format!(
                    "{name}: {field}: '{pattern}' unexpectedly found"
                ));
            }
        }
    }

    CaseOutcome::pass(format!("{name}: PASS"))
}
