//! Anvil Harness - fixture-driven testing of plugin hook scripts.
//!
//! Fixtures are declarative test cases living at
//! `<plugin>/fixtures/hooks/<case>/case.json`. Each one names an executable
//! hook script inside the plugin, an event payload to deliver on its
//! standard input, and a set of expectations over the resulting exit code
//! and output streams.
//!
//! The engine treats hook scripts as black-box processes: every load,
//! permission, spawn, timeout, and assertion failure becomes a normal
//! fail outcome, never an error of the run itself. A hung or crashing
//! script must not take the remaining fixtures down with it.

mod discover;
mod engine;
mod fixture;

pub use discover::discover_fixtures;
pub use engine::{run_case, CaseOutcome};
pub use fixture::{Expectations, Fixture, DEFAULT_TIMEOUT_SECONDS};
