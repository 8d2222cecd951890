//! Bounded subprocess execution.
//!
//! Everything anvil spawns (hook scripts under test, the optional
//! `claude plugin validate` call, the workspace consistency checker) goes
//! through [`run_with_timeout`], which turns the three ways a child process
//! can end into one explicit result type instead of a mix of errors and
//! timeouts.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Result of a bounded subprocess run.
#[derive(Debug)]
pub enum BoundedRun {
    /// The process terminated within the bound.
    Completed {
        /// Exit code; -1 when the process was terminated by a signal.
        exit_code: i32,
        /// Full standard output, decoded lossily as UTF-8.
        stdout: String,
        /// Full standard error, decoded lossily as UTF-8.
        stderr: String,
    },
    /// The bound elapsed first; the child has been killed and reaped.
    TimedOut,
    /// The process could not be spawned or its pipes failed.
    SpawnError(String),
}

/// Run `command` to completion, bounded by `timeout`.
///
/// When `stdin_text` is given the full text is delivered on the child's
/// standard input before output is collected; the child is expected to read
/// a complete document, not a stream. `kill_on_drop` is set so a child that
/// outlives the bound is terminated when its handle is dropped.
pub async fn run_with_timeout(
    mut command: Command,
    stdin_text: Option<&str>,
    timeout: Duration,
) -> BoundedRun {
    command
        .stdin(if stdin_text.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let result = tokio::time::timeout(timeout, async {
        let mut child = command.spawn()?;

        if let Some(text) = stdin_text {
            if let Some(mut stdin) = child.stdin.take() {
                let _ = stdin.write_all(text.as_bytes()).await;
                drop(stdin);
            }
        }

        child.wait_with_output().await
    })
    .await;

    match result {
        Ok(Ok(output)) => BoundedRun::Completed {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Ok(Err(e)) => BoundedRun::SpawnError(e.to_string()),
        Err(_) => BoundedRun::TimedOut,
    }
}
