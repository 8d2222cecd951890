//! README install-instruction checks, plus an optional pass through the
//! real `claude plugin validate` when the CLI is available.

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio::process::Command;

use anvil_common::{load_json_file, run_with_timeout, BoundedRun};
use anvil_report::Report;

use crate::util::truncate_chars;

static MARKETPLACE_ADD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"claude\s+plugin\s+marketplace\s+add\b").expect("valid regex"));
static PLUGIN_INSTALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"claude\s+plugin\s+install\s+(\S+)").expect("valid regex"));
static INSTALL_WITH_MARKETPLACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"claude\s+plugin\s+install\s+(\S+)@(\S+)").expect("valid regex"));

/// Bound on the external `claude plugin validate` call.
const CLI_VALIDATE_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn validate(plugin_root: &Path, report: &mut Report) {
    if check_install_docs(plugin_root, report) {
        let manifest_path = plugin_root.join(".claude-plugin").join("plugin.json");
        cli_validate(plugin_root, &manifest_path, report).await;
    }
}

/// The document-only checks. Returns true when the README was complete
/// enough that the external CLI validation step is worth running.
fn check_install_docs(plugin_root: &Path, report: &mut Report) -> bool {
    let readme_path = plugin_root.join("README.md");
    let readme_ok = std::fs::metadata(&readme_path)
        .map(|m| m.len() > 0)
        .unwrap_or(false);
    if !readme_ok {
        report.error("install_docs.no_readme", "README.md missing or empty", &[]);
        return false;
    }
    let Ok(text) = std::fs::read_to_string(&readme_path) else {
        report.error("install_docs.no_readme", "README.md missing or empty", &[]);
        return false;
    };

    let code_blocks = extract_code_blocks(&text);
    let all_code = code_blocks.join("\n");

    if !code_blocks.iter().any(|b| b.contains("claude plugin")) {
        report.error(
            "install_docs.no_install_block",
            "No fenced code block containing 'claude plugin'",
            &[],
        );
        return false;
    }

    if !MARKETPLACE_ADD_RE.is_match(&all_code) {
        report.error(
            "install_docs.no_marketplace_add",
            "Missing 'claude plugin marketplace add' line in code blocks",
            &[],
        );
    }

    let install_args: Vec<&str> = PLUGIN_INSTALL_RE
        .captures_iter(&all_code)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    if install_args.is_empty() {
        report.error(
            "install_docs.no_plugin_install",
            "Missing 'claude plugin install' line in code blocks",
            &[],
        );
        return false;
    }

    let manifest_path = plugin_root.join(".claude-plugin").join("plugin.json");
    let plugin_name = load_json_file(&manifest_path)
        .and_then(|m| m.get("name").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or_default();

    if !plugin_name.is_empty() {
        let name_found = install_args
            .iter()
            .any(|arg| arg.split('@').next() == Some(plugin_name.as_str()));
        if !name_found {
            report.error(
                "install_docs.name_mismatch",
                format!(
                    "Plugin name in install command doesn't match plugin.json name '{plugin_name}'"
                ),
                &[
                    ("readme_names", &install_args.join(", ")),
                    ("plugin_json", &plugin_name),
                ],
            );
        }
    }

    if !INSTALL_WITH_MARKETPLACE_RE.is_match(&all_code) {
        report.error(
            "install_docs.missing_marketplace_suffix",
            "Install command missing '@marketplace-name' suffix (e.g. 'plugin install name@emporium')",
            &[],
        );
    }

    true
}

/// When the `claude` CLI is installed, let it validate the manifest too.
/// Its absence or failure to run is informational, never blocking.
async fn cli_validate(plugin_root: &Path, manifest_path: &Path, report: &mut Report) {
    let Ok(claude_bin) = which::which("claude") else {
        report.info(
            "install_docs.cli_validate_skip",
            "claude CLI not in PATH, skipping manifest validation",
            &[],
        );
        return;
    };

    let target = if manifest_path.exists() {
        manifest_path
    } else {
        plugin_root
    };
    let mut command = Command::new(claude_bin);
    command.arg("plugin").arg("validate").arg(target);

    match run_with_timeout(command, None, CLI_VALIDATE_TIMEOUT).await {
        BoundedRun::Completed {
            exit_code, stderr, ..
        } if exit_code != 0 => {
            report.error(
                "install_docs.cli_validate_fail",
                format!("'claude plugin validate' failed (exit {exit_code})"),
                &[("stderr", &truncate_chars(stderr.trim(), 200))],
            );
        }
        BoundedRun::Completed { .. } => {}
        BoundedRun::TimedOut => {
            report.info(
                "install_docs.cli_validate_skip",
                format!("claude CLI error: timed out after {}s", CLI_VALIDATE_TIMEOUT.as_secs()),
                &[],
            );
        }
        BoundedRun::SpawnError(e) => {
            report.info(
                "install_docs.cli_validate_skip",
                format!("claude CLI error: {e}"),
                &[],
            );
        }
    }
}

/// Content of every fenced code block in a markdown document, by line scan.
fn extract_code_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        if line.trim().starts_with("```") {
            if in_block {
                blocks.push(current.join("\n"));
                current.clear();
                in_block = false;
            } else {
                in_block = true;
            }
        } else if in_block {
            current.push(line);
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_ids(report: &Report) -> Vec<&str> {
        report.findings().iter().map(|f| f.check_id.as_str()).collect()
    }

    fn write_plugin(plugin: &Path, name: &str, readme: &str) {
        std::fs::create_dir_all(plugin.join(".claude-plugin")).unwrap();
        std::fs::write(
            plugin.join(".claude-plugin/plugin.json"),
            format!(r#"{{"name": "{name}"}}"#),
        )
        .unwrap();
        std::fs::write(plugin.join("README.md"), readme).unwrap();
    }

    const GOOD_README: &str = "\
# demo

Install:

```bash
claude plugin marketplace add heurema/emporium
claude plugin install demo@emporium
```
";

    #[test]
    fn test_extract_code_blocks() {
        let blocks = extract_code_blocks("text\n```bash\none\ntwo\n```\nmore\n```\nthree\n```\n");
        assert_eq!(blocks, vec!["one\ntwo".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_extract_code_blocks_unterminated() {
        let blocks = extract_code_blocks("```\ndangling\n");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_missing_readme_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = Report::new("x");
        assert!(!check_install_docs(dir.path(), &mut report));
        assert_eq!(check_ids(&report), vec!["install_docs.no_readme"]);
    }

    #[test]
    fn test_readme_without_install_block_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(dir.path(), "demo", "# demo\n\nNo instructions here.\n");
        let mut report = Report::new("x");
        assert!(!check_install_docs(dir.path(), &mut report));
        assert_eq!(check_ids(&report), vec!["install_docs.no_install_block"]);
    }

    #[test]
    fn test_good_readme_has_no_doc_errors() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(dir.path(), "demo", GOOD_README);
        let mut report = Report::new("x");
        assert!(check_install_docs(dir.path(), &mut report));
        assert!(report.findings().is_empty(), "{:?}", check_ids(&report));
    }

    #[test]
    fn test_name_mismatch_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(dir.path(), "other-name", GOOD_README);
        let mut report = Report::new("x");
        check_install_docs(dir.path(), &mut report);
        let finding = report
            .findings()
            .iter()
            .find(|f| f.check_id == "install_docs.name_mismatch")
            .unwrap();
        assert_eq!(finding.sources["readme_names"], "demo@emporium");
        assert_eq!(finding.sources["plugin_json"], "other-name");
    }

    #[test]
    fn test_missing_marketplace_suffix_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(
            dir.path(),
            "demo",
            "# demo\n```bash\nclaude plugin marketplace add heurema/emporium\nclaude plugin install demo\n```\n",
        );
        let mut report = Report::new("x");
        check_install_docs(dir.path(), &mut report);
        assert!(check_ids(&report).contains(&"install_docs.missing_marketplace_suffix"));
    }

    #[test]
    fn test_missing_marketplace_add_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(
            dir.path(),
            "demo",
            "# demo\n```bash\nclaude plugin install demo@emporium\n```\n",
        );
        let mut report = Report::new("x");
        check_install_docs(dir.path(), &mut report);
        assert!(check_ids(&report).contains(&"install_docs.no_marketplace_add"));
    }
}
