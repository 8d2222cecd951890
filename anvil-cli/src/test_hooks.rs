//! The fixture-testing drive loop.

use std::io::Write;
use std::path::Path;

use anvil_common::AnvilError;
use anvil_harness::{discover_fixtures, run_case};

/// Run every discovered fixture strictly in sorted order, printing each
/// outcome as it lands, and return the aggregate exit code: 1 iff any
/// fixture failed.
///
/// Fixtures never overlap: the next case only starts once the previous
/// case's process has been fully reaped.
pub async fn run_tests(path: &Path) -> Result<i32, AnvilError> {
    let plugin_root = crate::resolve_plugin_path(path)?;

    let fixtures = discover_fixtures(&plugin_root);
    if fixtures.is_empty() {
        println!("No hook test fixtures found.");
        return Ok(0);
    }

    let mut passed = 0usize;
    let mut failed = 0usize;
    for case_path in &fixtures {
        let outcome = run_case(&plugin_root, case_path).await;
        let status = if outcome.passed { "PASS" } else { "FAIL" };
        println!("  [{status}] {}", outcome.message);
        // CI logs must show progress while later fixtures run.
        let _ = std::io::stdout().flush();
        if outcome.passed {
            passed += 1;
        } else {
            failed += 1;
        }
    }

    println!("\n{} tests: {passed} passed, {failed} failed", passed + failed);
    Ok(if failed > 0 { 1 } else { 0 })
}
