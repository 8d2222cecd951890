//! Anvil Rules - the validation rule collaborators.
//!
//! Each rule is an independent predicate over the plugin tree that appends
//! findings to a shared [`Report`](anvil_report::Report). Rules only append;
//! none reads another rule's findings, so their combined output depends only
//! on the fixed registration order below.

mod consistency;
mod conventions;
mod hooks;
mod install_docs;
mod schema;
mod structure;
mod util;

pub use consistency::validate as validate_consistency;
pub use conventions::validate as validate_conventions;
pub use hooks::validate as validate_hooks;
pub use install_docs::validate as validate_install_docs;
pub use schema::validate as validate_schema;
pub use structure::validate as validate_structure;

use std::path::Path;

use anvil_report::Report;

/// Run every rule against the plugin root, in registration order.
///
/// The order is part of the output contract: findings appear grouped by
/// rule, in the same sequence on every run.
pub async fn run_all(plugin_root: &Path, report: &mut Report) {
    structure::validate(plugin_root, report);
    schema::validate(plugin_root, report);
    hooks::validate(plugin_root, report);
    conventions::validate(plugin_root, report);
    install_docs::validate(plugin_root, report).await;
    consistency::validate(plugin_root, report).await;
    tracing::debug!(
        plugin = %plugin_root.display(),
        findings = report.findings().len(),
        "all rules complete"
    );
}
