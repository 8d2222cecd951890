//! Anvil Common - shared infrastructure for the anvil plugin validator.
//!
//! This crate provides the error type, tool-wide constants, lenient JSON
//! file loading, and the bounded subprocess primitive used by the fixture
//! engine and the subprocess-backed rules.

pub mod constants;
pub mod error;
pub mod fs;
pub mod process;

pub use constants::{PLUGIN_ROOT_ENV, TOOL_NAME};
pub use error::AnvilError;
pub use fs::{is_executable, load_json_file};
pub use process::{run_with_timeout, BoundedRun};
