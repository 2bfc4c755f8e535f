//! Running external tools without a shell.
//!
//! Arguments are handed to the child process as a discrete list, so nothing
//! in them is ever interpreted by `sh`: `;`, `$(...)` and quotes reach the
//! program literally.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Captured output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Error)]
pub enum ExecError {
    /// The program could not be started (not found, not executable, ...).
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The program ran and exited unsuccessfully. `code` is `None` when it
    /// was killed by a signal.
    #[error("{program} exited with {}: {stderr}", exit_label(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "signal".to_string(),
    }
}

/// Runs `program` with `args` and waits for it; stdin is closed.
pub fn exec_file_safe<I, S>(program: &str, args: I) -> Result<ExecOutput, ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    tracing::debug!(program, argc = cmd.get_args().len(), "spawning external tool");

    let output = cmd.output().map_err(|source| ExecError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        tracing::warn!(program, status = ?output.status.code(), "external tool failed");
        return Err(ExecError::Failed {
            program: program.to_string(),
            code: output.status.code(),
            stdout,
            stderr,
        });
    }
    Ok(ExecOutput { stdout, stderr })
}
