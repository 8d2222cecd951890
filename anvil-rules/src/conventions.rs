//! Authoring convention checks: command injection style, skill and agent
//! frontmatter, and a whole-tree sweep for hardcoded paths and secrets.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use anvil_report::Report;

use crate::util::{file_name, relative, sorted_entries};

static FIRST_PERSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(I |You |My |Your )").expect("valid regex"));
static SECRET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(api[_-]?key|token|password|secret)\s*[:=]").expect("valid regex")
});
static HARDCODED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Users/|/home/").expect("valid regex"));

const TEMPLATE_EXTENSIONS: [&str; 3] = ["tmpl", "template", "j2"];
const MAX_SKILL_DESCRIPTION_CHARS: usize = 1024;

pub fn validate(plugin_root: &Path, report: &mut Report) {
    check_commands(plugin_root, report);
    check_skills(plugin_root, report);
    check_agents(plugin_root, report);
    sweep_tree(plugin_root, report);
}

/// Commands that mention the Read tool without a static
/// `@${CLAUDE_PLUGIN_ROOT}` injection usually re-read plugin files at
/// runtime, which is slower and version-skewed.
fn check_commands(plugin_root: &Path, report: &mut Report) {
    let commands_dir = plugin_root.join("commands");
    if !commands_dir.is_dir() {
        return;
    }
    for entry in sorted_entries(&commands_dir) {
        if entry.extension().map(|e| e != "md").unwrap_or(true) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&entry) else {
            continue;
        };
        if content.contains("Read tool") && !content.contains("${CLAUDE_PLUGIN_ROOT}") {
            report.info(
                "conventions.no_static_injection",
                format!(
                    "Command {} may use runtime Read instead of @${{CLAUDE_PLUGIN_ROOT}}",
                    file_name(&entry)
                ),
                &[("file", &relative(&entry, plugin_root))],
            );
        }
    }
}

fn check_skills(plugin_root: &Path, report: &mut Report) {
    let skills_dir = plugin_root.join("skills");
    if !skills_dir.is_dir() {
        return;
    }
    for entry in sorted_entries(&skills_dir) {
        if !entry.is_dir() {
            continue;
        }
        let skill = file_name(&entry);
        let skill_file = entry.join("SKILL.md");
        // Missing entrypoints are the structure rule's finding.
        let Ok(content) = std::fs::read_to_string(&skill_file) else {
            continue;
        };

        let description = frontmatter_field(&content, "description");
        if description.is_empty() {
            report.warn(
                "conventions.skill_no_description",
                format!("Skill {skill} has no description in frontmatter"),
                &[("skill", &skill)],
            );
            continue;
        }

        if description.chars().count() > MAX_SKILL_DESCRIPTION_CHARS {
            report.warn(
                "conventions.skill_description_long",
                format!(
                    "Skill {skill} description exceeds {MAX_SKILL_DESCRIPTION_CHARS} chars ({})",
                    description.chars().count()
                ),
                &[("skill", &skill)],
            );
        }

        if FIRST_PERSON_RE.is_match(&description) {
            report.warn(
                "conventions.skill_first_person",
                format!("Skill {skill} description uses first/second person"),
                &[("skill", &skill)],
            );
        }

        // Directory-name keywords should appear so the skill is findable
        // from its description alone.
        let description_lower = description.to_lowercase();
        let missing: Vec<&str> = skill
            .split('-')
            .filter(|k| !k.is_empty() && !description_lower.contains(&k.to_lowercase()))
            .collect();
        if !missing.is_empty() {
            report.info(
                "conventions.skill_missing_keywords",
                format!(
                    "Skill {skill} description missing keywords: {}",
                    missing.join(", ")
                ),
                &[("skill", &skill)],
            );
        }
    }
}

fn check_agents(plugin_root: &Path, report: &mut Report) {
    let agents_dir = plugin_root.join("agents");
    if !agents_dir.is_dir() {
        return;
    }
    for entry in sorted_entries(&agents_dir) {
        if entry.extension().map(|e| e != "md").unwrap_or(true) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&entry) else {
            continue;
        };
        let name = file_name(&entry);
        for field in ["name", "description", "model", "tools"] {
            if frontmatter_field(&content, field).is_empty() {
                report.warn(
                    "conventions.agent_missing_field",
                    format!("Agent {name} missing frontmatter field: {field}"),
                    &[("file", &name), ("field", field)],
                );
            }
        }
    }
}

/// Recursive sweep for hardcoded user paths and secret-shaped assignments,
/// skipping VCS internals and template files.
fn sweep_tree(plugin_root: &Path, report: &mut Report) {
    let walker = WalkDir::new(plugin_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            name != ".git" && name != "__pycache__"
        });

    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        if TEMPLATE_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        let content = String::from_utf8_lossy(&bytes);
        let rel = relative(path, plugin_root);

        if HARDCODED_PATH_RE.is_match(&content) {
            report.warn(
                "conventions.hardcoded_path",
                format!("Hardcoded user path in {rel}"),
                &[("file", &rel)],
            );
        }

        if SECRET_RE.is_match(&content) && extension != "md" && extension != "txt" {
            report.warn(
                "conventions.possible_secret",
                format!("Possible secret pattern in {rel}"),
                &[("file", &rel)],
            );
        }
    }
}

/// Extract a field value from YAML frontmatter with a line scanner.
///
/// Handles `|` and `>` multi-line scalars by joining the indented
/// continuation lines; quoted scalars are unquoted. Returns an empty
/// string when the document has no frontmatter or the field is absent.
fn frontmatter_field(content: &str, field: &str) -> String {
    if !content.starts_with("---") {
        return String::new();
    }
    let Some(end) = content[3..].find("---") else {
        return String::new();
    };
    let frontmatter = &content[3..3 + end];
    let lines: Vec<&str> = frontmatter.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix(field) else {
            continue;
        };
        let Some(value) = rest.strip_prefix(':') else {
            continue;
        };
        let value = value.trim();

        if value == "|" || value == ">" {
            let mut parts = Vec::new();
            for continuation in &lines[i + 1..] {
                if continuation.starts_with(' ') || continuation.starts_with('\t') {
                    parts.push(continuation.trim());
                } else {
                    break;
                }
            }
            return parts.join(" ");
        }

        return value
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_ids(report: &Report) -> Vec<&str> {
        report.findings().iter().map(|f| f.check_id.as_str()).collect()
    }

    fn write_skill(plugin: &Path, name: &str, skill_md: &str) {
        let dir = plugin.join("skills").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("SKILL.md"), skill_md).unwrap();
    }

    #[test]
    fn test_frontmatter_field_simple() {
        let content = "---\nname: demo\ndescription: \"a quoted value\"\n---\nbody";
        assert_eq!(frontmatter_field(content, "name"), "demo");
        assert_eq!(frontmatter_field(content, "description"), "a quoted value");
        assert_eq!(frontmatter_field(content, "missing"), "");
    }

    #[test]
    fn test_frontmatter_field_multiline() {
        let content = "---\ndescription: |\n  first line\n  second line\nother: x\n---\n";
        assert_eq!(
            frontmatter_field(content, "description"),
            "first line second line"
        );
    }

    #[test]
    fn test_frontmatter_field_without_frontmatter() {
        assert_eq!(frontmatter_field("# just markdown", "name"), "");
    }

    #[test]
    fn test_skill_without_description_warns() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "review", "---\nname: review\n---\nbody");
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        assert!(check_ids(&report).contains(&"conventions.skill_no_description"));
    }

    #[test]
    fn test_skill_first_person_description_warns() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(
            dir.path(),
            "review",
            "---\ndescription: You should use this to review code\n---\n",
        );
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        assert!(check_ids(&report).contains(&"conventions.skill_first_person"));
    }

    #[test]
    fn test_skill_missing_keywords_is_info() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(
            dir.path(),
            "code-review",
            "---\ndescription: Examines diffs for defects in code\n---\n",
        );
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        let finding = report
            .findings()
            .iter()
            .find(|f| f.check_id == "conventions.skill_missing_keywords")
            .unwrap();
        assert!(finding.message.contains("review"));
        assert!(!finding.message.contains("code,"));
    }

    #[test]
    fn test_complete_skill_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(
            dir.path(),
            "code-review",
            "---\ndescription: Reviews code changes for defects. Use when a code review is requested.\n---\n",
        );
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        assert!(report.findings().is_empty(), "{:?}", check_ids(&report));
    }

    #[test]
    fn test_agent_missing_fields_warn_each() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("agents")).unwrap();
        std::fs::write(
            dir.path().join("agents/helper.md"),
            "---\nname: helper\ndescription: does things\n---\n",
        )
        .unwrap();
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        let fields: Vec<&str> = report
            .findings()
            .iter()
            .filter(|f| f.check_id == "conventions.agent_missing_field")
            .map(|f| f.sources["field"].as_str())
            .collect();
        assert_eq!(fields, vec!["model", "tools"]);
    }

    #[test]
    fn test_command_with_runtime_read_is_info() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("commands")).unwrap();
        std::fs::write(
            dir.path().join("commands/lint.md"),
            "Use the Read tool to load the checklist.",
        )
        .unwrap();
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        assert!(check_ids(&report).contains(&"conventions.no_static_injection"));
    }

    #[test]
    fn test_hardcoded_path_in_tree_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
        std::fs::write(
            dir.path().join("scripts/setup.sh"),
            "cp /home/someone/config .",
        )
        .unwrap();
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        let finding = report
            .findings()
            .iter()
            .find(|f| f.check_id == "conventions.hardcoded_path")
            .unwrap();
        assert_eq!(finding.sources["file"], "scripts/setup.sh");
    }

    #[test]
    fn test_secret_pattern_skips_markdown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.md"), "api_key: not-a-real-secret").unwrap();
        std::fs::write(dir.path().join("run.sh"), "api_key=abc123").unwrap();
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        let files: Vec<&str> = report
            .findings()
            .iter()
            .filter(|f| f.check_id == "conventions.possible_secret")
            .map(|f| f.sources["file"].as_str())
            .collect();
        assert_eq!(files, vec!["run.sh"]);
    }

    #[test]
    fn test_template_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.j2"),
            "password = {{ vault_password }} in /home/user",
        )
        .unwrap();
        let mut report = Report::new("x");
        validate(dir.path(), &mut report);
        assert!(report.findings().is_empty(), "{:?}", check_ids(&report));
    }
}
