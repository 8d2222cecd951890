//! Plugin directory structure and file naming checks.

use std::path::Path;

use anvil_report::Report;

use crate::util::{file_name, relative, sorted_entries};

const COMPONENT_DIRS: [&str; 4] = ["commands", "skills", "agents", "hooks"];
const ALLOWED_IN_CLAUDE_PLUGIN: [&str; 2] = ["plugin.json", "marketplace.json"];

/// Minimum README size below which the file is considered effectively empty.
const MIN_README_BYTES: u64 = 50;

pub fn validate(plugin_root: &Path, report: &mut Report) {
    // .claude-plugin/ must exist; without it nothing else is checkable.
    let manifest_dir = plugin_root.join(".claude-plugin");
    if !manifest_dir.is_dir() {
        report.error(
            "structure.no_claude_plugin",
            "Missing .claude-plugin/ directory",
            &[],
        );
        return;
    }

    for entry in sorted_entries(&manifest_dir) {
        let name = file_name(&entry);
        if !ALLOWED_IN_CLAUDE_PLUGIN.contains(&name.as_str()) {
            report.warn(
                "structure.unexpected_manifest_file",
                format!("Unexpected file in .claude-plugin/: {name}"),
                &[("file", &name)],
            );
        }
    }

    let has_component = COMPONENT_DIRS
        .iter()
        .any(|d| plugin_root.join(d).is_dir());
    if !has_component {
        report.warn(
            "structure.no_components",
            "No component directories found (commands/, skills/, agents/, hooks/)",
            &[],
        );
    }

    let readme = plugin_root.join("README.md");
    match std::fs::metadata(&readme) {
        Err(_) => report.error("structure.no_readme", "Missing README.md", &[]),
        Ok(meta) if meta.len() < MIN_README_BYTES => report.warn(
            "structure.empty_readme",
            "README.md appears empty or minimal",
            &[],
        ),
        Ok(_) => {}
    }

    if !plugin_root.join("LICENSE").exists() {
        report.warn("structure.no_license", "Missing LICENSE file", &[]);
    }

    // Commands must be markdown files.
    let commands_dir = plugin_root.join("commands");
    if commands_dir.is_dir() {
        for entry in sorted_entries(&commands_dir) {
            if entry.is_file() && entry.extension().map(|e| e != "md").unwrap_or(true) {
                report.warn(
                    "structure.command_not_md",
                    format!("Command file is not .md: {}", file_name(&entry)),
                    &[("file", &relative(&entry, plugin_root))],
                );
            }
        }
    }

    // Skills are directories with a SKILL.md entrypoint.
    let skills_dir = plugin_root.join("skills");
    if skills_dir.is_dir() {
        for entry in sorted_entries(&skills_dir) {
            if entry.is_dir() && !entry.join("SKILL.md").exists() {
                let skill = file_name(&entry);
                report.error(
                    "structure.skill_no_entrypoint",
                    format!("Skill {skill}/ missing SKILL.md entrypoint"),
                    &[("skill", &skill)],
                );
            }
        }
    }

    // Agents are markdown files opening with YAML frontmatter.
    let agents_dir = plugin_root.join("agents");
    if agents_dir.is_dir() {
        for entry in sorted_entries(&agents_dir) {
            if !entry.is_file() {
                continue;
            }
            let name = file_name(&entry);
            if entry.extension().map(|e| e != "md").unwrap_or(true) {
                report.warn(
                    "structure.agent_not_md",
                    format!("Agent file is not .md: {name}"),
                    &[("file", &name)],
                );
            } else if let Ok(content) = std::fs::read_to_string(&entry) {
                if !content.starts_with("---") {
                    report.warn(
                        "structure.agent_no_frontmatter",
                        format!("Agent {name} missing YAML frontmatter"),
                        &[("file", &name)],
                    );
                }
            }
        }
    }
}
