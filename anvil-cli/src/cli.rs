//! CLI definition for the anvil command-line interface.
//!
//! This module is self-contained; it only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Anvil - Claude Code plugin bundle validator
///
/// Validates the on-disk layout and conventions of a plugin, and runs
/// declarative test fixtures against its hook scripts.
#[derive(Parser, Debug)]
#[command(name = "anvil")]
#[command(version)]
#[command(about = "Anvil - Claude Code plugin bundle validator")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all validation rules against a plugin and print a report
    Check {
        /// Plugin directory to validate
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Emit the machine-readable JSON report instead of human text
        #[arg(long)]
        json: bool,
    },
    /// Run the plugin's declarative hook-script test fixtures
    Test {
        /// Plugin directory containing fixtures/hooks/
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}
