//! Anvil CLI - plugin bundle validator.
//!
//! Commands:
//! - `anvil check [path] [--json]`: run validation rules, print a report
//! - `anvil test [path]`: run hook-script test fixtures
//!
//! Exit codes:
//! - 0: Success
//! - 1: Findings with ERROR severity / failed fixtures
//! - 2: Driver-fatal error (e.g. the target path does not exist)

use clap::Parser;
use tracing_subscriber::EnvFilter;

use anvil::{run_check, run_tests, Cli, Commands};
use anvil_common::AnvilError;

/// Exit code for conditions that make the whole run meaningless, distinct
/// from the finding-derived exit 1.
const FATAL_EXIT_CODE: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Reports go to stdout; logs stay on stderr so machine consumers can
    // parse the output stream.
    let filter = if cli.debug {
        EnvFilter::new("anvil=debug,anvil_common=debug,anvil_report=debug,anvil_rules=debug,anvil_harness=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match dispatch_command(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            FATAL_EXIT_CODE
        }
    };
    std::process::exit(exit_code);
}

async fn dispatch_command(cli: Cli) -> Result<i32, AnvilError> {
    match cli.command {
        Commands::Check { path, json } => run_check(&path, json).await,
        Commands::Test { path } => run_tests(&path).await,
    }
}
