//! Command executor - runs the resolved command in the foreground

use std::io;
use std::process::{Command, Stdio};

use thiserror::Error;

use super::dispatch::ResolvedCommand;

/// Exit status recorded when the program could not be found.
pub const STATUS_NOT_FOUND: i32 = 127;
/// Exit status recorded when the program was found but could not be run.
pub const STATUS_CANNOT_EXECUTE: i32 = 126;
/// Exit status recorded for a child that ended without a code (killed by a signal).
pub const STATUS_NO_CODE: i32 = -1;

/// The child process could not be started or waited on.
#[derive(Debug, Error)]
#[error("{program}: {source}")]
pub struct LaunchError {
    pub program: String,
    #[source]
    pub source: io::Error,
}

impl LaunchError {
    /// Status to record in place of a real exit code, shell style.
    pub fn exit_status(&self) -> i32 {
        if self.source.kind() == io::ErrorKind::NotFound {
            STATUS_NOT_FOUND
        } else {
            STATUS_CANNOT_EXECUTE
        }
    }
}

/// Runs a resolved command to completion and reports its exit code.
pub trait Runner {
    fn run(&mut self, command: &ResolvedCommand) -> Result<i32, LaunchError>;
}

/// Spawns the command as a child sharing our stdin/stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&mut self, command: &ResolvedCommand) -> Result<i32, LaunchError> {
        let launch_error = |source| LaunchError {
            program: command.program().to_string(),
            source,
        };

        let mut child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(launch_error)?;

        let status = child.wait().map_err(launch_error)?;
        Ok(status.code().unwrap_or(STATUS_NO_CODE))
    }
}
