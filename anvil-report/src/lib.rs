//! Anvil Report - the finding accumulation model.
//!
//! A [`Report`] owns an append-only, ordered sequence of [`Finding`]s
//! produced by rule collaborators during one validation run. The exit code
//! of a run is a pure function of the findings: 1 iff any ERROR exists.
//!
//! # Example
//!
//! ```
//! use anvil_report::Report;
//!
//! let mut report = Report::new("/plugins/demo");
//! report.error("schema.no_manifest", "No .claude-plugin/plugin.json found", &[]);
//! report.warn("structure.no_license", "Missing LICENSE file", &[]);
//!
//! assert!(report.has_errors());
//! assert_eq!(report.exit_code(), 1);
//! assert_eq!(report.summary().error, 1);
//! ```

mod render;
mod report;
mod types;

pub use report::Report;
pub use types::{Finding, Severity, Summary};
