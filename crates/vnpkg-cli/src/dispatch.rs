//! Runs the packager in a child process.
//!
//! `vnpkg pack` re-invokes the current executable with a hidden worker
//! subcommand. The child shares our stdin, stdout and stderr, and its exit
//! status becomes ours.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, ExitCode, Stdio};
use thiserror::Error;

/// Hidden subcommand that performs the packaging in the child.
pub const WORKER_COMMAND: &str = "pack-worker";

/// The child process ran but did not succeed.
#[derive(Debug, Error)]
#[error("packager exited with {}", describe(.code))]
pub struct ChildFailed {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub code: Option<i32>,
}

fn describe(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Package the project at `path` in a child process and wait for it.
pub fn run_pack(path: Option<&Path>) -> Result<()> {
    let exe = std::env::current_exe().context("Failed to locate the vnpkg executable")?;

    let mut cmd = Command::new(exe);
    cmd.arg(WORKER_COMMAND);
    if let Some(path) = path {
        cmd.arg(path);
    }

    run_child(cmd)
}

/// Run `cmd` with inherited stdio and block until it exits.
pub fn run_child(mut cmd: Command) -> Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(%program, "spawning packager");

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to launch packager: {program}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(ChildFailed {
            code: status.code(),
        }
        .into())
    }
}

/// Exit code mirroring a failed child, or 1 for any other failure.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let code = err
        .downcast_ref::<ChildFailed>()
        .and_then(|failed| failed.code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1);

    ExitCode::from(code)
}
