//! Isolated scanner process execution.
//!
//! Each task spawns the scanner as its own child process from a discrete
//! argument vector — never through a shell — waits for it under a
//! wall-clock budget, and captures both output streams. Every failure mode
//! (executable missing, timeout, other I/O faults) is converted into a
//! per-task `ok=false` result; nothing here can abort a sibling task.

use std::process::Stdio;
use std::time::Duration;

use log::{debug, warn};
use tokio::process::Command;

use crate::command::ArgumentVector;
use crate::config::{MAX_CAPTURED_OUTPUT_CHARS, TRUNCATION_MARKER};
use crate::error_handling::TaskError;
use crate::extract::extract;
use crate::report::ScanResult;

/// Runs one argument vector as an isolated child process.
///
/// The child gets no shell interpretation and no stdin. On completion the
/// captured output is truncated to the configured cap and handed to the
/// extractor — whatever the scanner printed is parsed even when its exit
/// code is nonzero, since partial findings are still findings. `ok` is
/// true iff the exit code is zero.
///
/// On timeout the child is killed and the result carries a timeout error
/// with no output. A missing executable yields a distinct spawn error.
pub async fn run(command: ArgumentVector, timeout: Duration) -> ScanResult {
    debug!("Spawning scanner: {:?}", command.tokens());

    let child = Command::new(command.program())
        .args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            let task_err = TaskError::from_spawn_io(e);
            warn!("Failed to spawn scanner: {task_err}");
            return ScanResult::failure(task_err.to_string(), Some(command));
        }
    };

    // Dropping the wait future on timeout kills the child (kill_on_drop)
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            let task_err = TaskError::Runtime(e);
            warn!("Scanner process failed: {task_err}");
            return ScanResult::failure(task_err.to_string(), Some(command));
        }
        Err(_) => {
            warn!(
                "Scanner exceeded its {}s budget, terminating",
                timeout.as_secs()
            );
            return ScanResult::failure(TaskError::Timeout.to_string(), Some(command));
        }
    };

    let stdout = truncate_output(String::from_utf8_lossy(&output.stdout).into_owned());
    let stderr = truncate_output(String::from_utf8_lossy(&output.stderr).into_owned());

    let ok = output.status.success();
    let extraction = extract(&stdout);

    ScanResult {
        ok,
        exit_code: output.status.code(),
        command: Some(command),
        stdout,
        stderr,
        log_matches: extraction.logs,
        parameters: extraction.parameters,
        databases: extraction.databases,
        error: None,
    }
}

/// Truncates a captured stream to the output cap, appending the truncation
/// marker when anything was cut. The cap is measured in characters, not
/// bytes, so multi-byte output never splits a code point.
fn truncate_output(text: String) -> String {
    match text.char_indices().nth(MAX_CAPTURED_OUTPUT_CHARS) {
        None => text,
        Some((byte_index, _)) => {
            let mut truncated = text[..byte_index].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}
