//! Manifest schema and CHANGELOG semver checks.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use anvil_common::load_json_file;
use anvil_report::Report;

static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)$").expect("valid regex")
});
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("valid regex"));
static CHANGELOG_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##\s*\[(\d+\.\d+\.\d+)\]").expect("valid regex"));

const REQUIRED_FIELDS: [&str; 5] = ["name", "version", "description", "author", "license"];

pub fn validate(plugin_root: &Path, report: &mut Report) {
    let manifest_path = plugin_root.join(".claude-plugin").join("plugin.json");
    let Some(manifest) = load_json_file(&manifest_path) else {
        report.error(
            "schema.no_manifest",
            "No .claude-plugin/plugin.json found",
            &[],
        );
        return;
    };

    for field in REQUIRED_FIELDS {
        let value = manifest.get(field);
        if value.is_none() || value == Some(&serde_json::Value::Null) {
            report.error(
                "schema.missing_field",
                format!("plugin.json missing required field: {field}"),
                &[("field", field)],
            );
        }
    }

    let name = manifest.get("name").and_then(|v| v.as_str()).unwrap_or("");
    if !name.is_empty() && !SLUG_RE.is_match(name) {
        report.error(
            "schema.invalid_name",
            format!("plugin.json name is not a valid slug: {name}"),
            &[("name", name)],
        );
    }

    let dir_name = plugin_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !name.is_empty() && name != dir_name {
        report.warn(
            "schema.name_mismatch",
            "plugin.json name doesn't match directory name",
            &[("plugin_json", name), ("directory", &dir_name)],
        );
    }

    let version = manifest.get("version");
    let version_str = match version {
        Some(serde_json::Value::String(v)) => {
            if !SEMVER_RE.is_match(v) {
                report.error(
                    "schema.invalid_version",
                    format!("plugin.json version is not valid semver: {v}"),
                    &[],
                );
            }
            Some(v.as_str())
        }
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            report.error(
                "schema.version_type",
                format!("plugin.json version is not a string: {}", json_kind(other)),
                &[],
            );
            None
        }
    };

    let changelog_path = plugin_root.join("CHANGELOG.md");
    if changelog_path.exists() {
        if let (Some(version), Ok(text)) = (version_str, std::fs::read_to_string(&changelog_path))
        {
            match CHANGELOG_VERSION_RE
                .captures(&text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
            {
                Some(changelog_version) if changelog_version != version => report.error(
                    "schema.version_drift",
                    "plugin.json version doesn't match CHANGELOG",
                    &[("plugin_json", version), ("changelog", changelog_version)],
                ),
                Some(_) => {}
                None => report.warn(
                    "schema.no_changelog_version",
                    "CHANGELOG.md has no version entry",
                    &[],
                ),
            }
        }
    } else {
        report.warn("schema.no_changelog", "No CHANGELOG.md found", &[]);
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
