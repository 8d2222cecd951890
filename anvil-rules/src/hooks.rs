//! Hook manifest checks: schema shape, referenced scripts, risky content.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use anvil_common::{is_executable, load_json_file};
use anvil_report::Report;

use crate::util::truncate_chars;

static EVAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\beval\s").expect("valid regex"));
static CMD_SUBST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\([^)]*\)").expect("valid regex"));
static HARDCODED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Users/|/home/").expect("valid regex"));

const PLUGIN_ROOT_VAR: &str = "${CLAUDE_PLUGIN_ROOT}";

const VALID_EVENTS: [&str; 9] = [
    "PreToolUse",
    "PostToolUse",
    "Stop",
    "SubagentStop",
    "SessionStart",
    "SessionEnd",
    "UserPromptSubmit",
    "PreCompact",
    "Notification",
];

pub fn validate(plugin_root: &Path, report: &mut Report) {
    let hooks_json_path = plugin_root.join("hooks").join("hooks.json");
    let Some(hooks_data) = load_json_file(&hooks_json_path) else {
        if plugin_root.join("hooks").is_dir() {
            report.warn(
                "hooks.no_hooks_json",
                "hooks/ directory exists but no hooks.json found",
                &[],
            );
        }
        return;
    };

    if !hooks_data.is_object() {
        report.error(
            "hooks.invalid_schema",
            "hooks.json must be a JSON object",
            &[],
        );
        return;
    }

    // Two accepted layouts for the hooks field:
    // array:  {"hooks": [{"event": "SessionStart", "matcher": "...", "hooks": [...]}]}
    // object: {"hooks": {"SessionStart": [{"matcher": "...", "hooks": [...]}]}}
    let empty = Value::Array(Vec::new());
    let hooks_field = hooks_data.get("hooks").unwrap_or(&empty);
    let mut normalized: Vec<(String, &Value)> = Vec::new();

    match hooks_field {
        Value::Array(entries) => {
            for hook in entries {
                let event = hook
                    .get("event")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                normalized.push((event.to_string(), hook));
            }
        }
        Value::Object(by_event) => {
            for (event, entries) in by_event {
                if let Value::Array(entries) = entries {
                    for entry in entries {
                        normalized.push((event.clone(), entry));
                    }
                }
            }
        }
        _ => {
            report.error(
                "hooks.invalid_hooks_field",
                "hooks.hooks must be an array or object",
                &[],
            );
            return;
        }
    }

    for (i, (event, hook)) in normalized.iter().enumerate() {
        let prefix = format!("hooks[{i}]");

        if !VALID_EVENTS.contains(&event.as_str()) {
            report.warn(
                "hooks.unknown_event",
                format!("{prefix}: unknown event '{event}'"),
                &[("event", event)],
            );
        }

        if hook.get("matcher").is_none() && hook.get("pattern").is_none() {
            report.info(
                "hooks.no_matcher",
                format!("{prefix}: no matcher/pattern; hook matches all"),
                &[],
            );
        }

        let sub_hooks = hook
            .get("hooks")
            .and_then(|v| v.as_array())
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        for sub_hook in sub_hooks {
            let cmd = sub_hook
                .get("command")
                .and_then(|v| v.as_str())
                .unwrap_or_default();

            // Script references should route through the plugin root variable
            // so the plugin stays relocatable.
            if !cmd.is_empty() && cmd.contains('/') && !cmd.contains(PLUGIN_ROOT_VAR) {
                report.warn(
                    "hooks.no_plugin_root",
                    format!("{prefix}: command path doesn't use ${{CLAUDE_PLUGIN_ROOT}}"),
                    &[("command", &truncate_chars(cmd, 80))],
                );
            }

            if cmd.contains(PLUGIN_ROOT_VAR) {
                check_referenced_script(plugin_root, report, &prefix, cmd);
            }

            if let Some(timeout) = sub_hook.get("timeout") {
                let in_range = timeout
                    .as_f64()
                    .map(|t| (1.0..=600.0).contains(&t))
                    .unwrap_or(false);
                if !in_range {
                    report.warn(
                        "hooks.bad_timeout",
                        format!("{prefix}: timeout should be 1-600 seconds, got {timeout}"),
                        &[],
                    );
                }
            }
        }
    }
}

/// Resolve a `${CLAUDE_PLUGIN_ROOT}`-relative command and check the script
/// it names: existence, executability, and risky shell content.
fn check_referenced_script(plugin_root: &Path, report: &mut Report, prefix: &str, cmd: &str) {
    let script_rel = cmd
        .replace(PLUGIN_ROOT_VAR, "")
        .trim_start_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    let script_path = plugin_root.join(&script_rel);

    if !script_path.exists() {
        report.error(
            "hooks.missing_script",
            format!("{prefix}: referenced script not found: {script_rel}"),
            &[("script", &script_rel)],
        );
    } else if !is_executable(&script_path) {
        report.error(
            "hooks.not_executable",
            format!("{prefix}: script not executable: {script_rel}"),
            &[("script", &script_rel)],
        );
    } else {
        let content = std::fs::read(&script_path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        for desc in dangerous_patterns(&content) {
            report.warn(
                "hooks.dangerous_pattern",
                format!("{prefix}: {script_rel} contains {desc}"),
                &[("script", &script_rel), ("pattern", desc)],
            );
        }
    }
}

/// Descriptions of risky constructs found in a shell script, in a fixed order.
fn dangerous_patterns(content: &str) -> Vec<&'static str> {
    let mut hits = Vec::new();
    if EVAL_RE.is_match(content) {
        hits.push("eval usage");
    }
    if has_unquoted_substitution(content) {
        hits.push("unquoted command substitution");
    }
    if HARDCODED_PATH_RE.is_match(content) {
        hits.push("hardcoded user path");
    }
    hits
}

/// A `$(...)` that is neither part of an arithmetic `$$(` form nor
/// immediately followed by a quote.
fn has_unquoted_substitution(content: &str) -> bool {
    for m in CMD_SUBST_RE.find_iter(content) {
        let preceded_by_dollar = content[..m.start()].ends_with('$');
        let followed_by_quote = matches!(content[m.end()..].chars().next(), Some('"') | Some('\''));
        if !preceded_by_dollar && !followed_by_quote {
            return true;
        }
    }
    false
}
