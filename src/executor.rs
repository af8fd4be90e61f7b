//! Running a single example script in its own process

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// How a script run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Ran to the end without an unhandled fault
    Completed,
    /// Exited unsuccessfully; `None` when killed by a signal
    Faulted(Option<i32>),
    /// Stopped by an interrupt, which ends the whole run
    Interrupted,
}

/// Everything observed from one script run
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub termination: Termination,
    pub stdout: String,
    pub stderr: String,
}

/// Executes a unit of code in isolation, capturing its output and any fault
///
/// Implementations run with the process working directory already set to
/// the script's own directory.
pub trait ScriptExecutor {
    fn execute(&self, script: &Path) -> Result<Execution>;
}

/// Runs scripts as `<program> <args...> <script>`
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: String,
    args: Vec<String>,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl ScriptExecutor for ProcessExecutor {
    fn execute(&self, script: &Path) -> Result<Execution> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(script)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                Error::Generic(format!(
                    "cannot run {} {}: {}",
                    self.program,
                    script.display(),
                    e
                ))
            })?;

        Ok(Execution {
            termination: termination(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(unix)]
fn termination(status: ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;
    const SIGINT: i32 = 2;

    if status.success() {
        Termination::Completed
    } else if status.signal() == Some(SIGINT) {
        Termination::Interrupted
    } else {
        Termination::Faulted(status.code())
    }
}

#[cfg(not(unix))]
fn termination(status: ExitStatus) -> Termination {
    if status.success() {
        Termination::Completed
    } else {
        Termination::Faulted(status.code())
    }
}
