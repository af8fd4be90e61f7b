//! Example script runner
//!
//! Example scripts are documentation written to run from their own folder.
//! Each one runs with the working directory set to the script's directory.
//! Warnings are captured and, once the script completes, re-emitted unless
//! harmless. A fault in one script prints its trace and is counted without
//! stopping the rest of the batch.

use crate::config::{HarnessConfig, Verbosity};
use crate::diagnostics::{show_diagnostic, show_trace, Diagnostic, DiagnosticFilter};
use crate::error::{Error, Result};
use crate::executor::{ProcessExecutor, ScriptExecutor, Termination};
use crate::totals::RunTotals;
use crate::workdir::WorkdirGuard;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// What happened to one example script
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRun {
    /// Path as discovered, relative to the starting directory if the root was
    pub script: PathBuf,
    /// Diagnostics re-emitted after the script completed
    pub shown: Vec<Diagnostic>,
    /// Non-diagnostic stderr relayed after the script completed
    pub relayed: String,
    pub faulted: bool,
}

/// Result of running a batch of example scripts
#[derive(Debug, Default)]
pub struct ExampleReport {
    pub totals: RunTotals,
    /// One entry per attempted script, in discovery order
    pub scripts: Vec<ScriptRun>,
}

/// Discovers and runs example scripts
pub struct ExampleRunner<E> {
    executor: E,
    script_suffix: String,
    verbosity: Verbosity,
    filter: DiagnosticFilter,
}

impl ExampleRunner<ProcessExecutor> {
    /// Runner that executes scripts with the configured interpreter
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        let executor = ProcessExecutor::new(&config.interpreter, config.interpreter_args.clone());
        Self::new(executor, &config.script_suffix, config.verbosity)
    }
}

impl<E: ScriptExecutor> ExampleRunner<E> {
    pub fn new(executor: E, script_suffix: impl Into<String>, verbosity: Verbosity) -> Result<Self> {
        Ok(Self {
            executor,
            script_suffix: script_suffix.into(),
            verbosity,
            filter: DiagnosticFilter::new()?,
        })
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Every script under `root`, collected before anything runs
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        if !root.is_dir() {
            error!("example directory {} does not exist", root.display());
            return Vec::new();
        }

        let mut scripts: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(&self.script_suffix))
            })
            .map(|entry| entry.into_path())
            .collect();

        scripts.sort();
        scripts
    }

    /// Run every script under `root`
    ///
    /// The working directory is the same on return as on entry. Only an
    /// interrupted script ends the batch early, as [`Error::Interrupted`].
    pub fn run(&self, root: &Path) -> Result<ExampleReport> {
        info!("running example tests");

        let origin = match WorkdirGuard::hold() {
            Ok(origin) => origin,
            Err(e) => {
                error!("cannot determine the working directory: {}", e);
                return Ok(ExampleReport::default());
            }
        };

        let scripts = self.discover(root);
        let mut report = ExampleReport::default();
        report.totals.add_attempts(scripts.len());

        for script in scripts {
            let run = match self.run_script(&origin, &script) {
                Ok(run) => run,
                Err(e @ Error::Interrupted { .. }) => return Err(e),
                Err(e) => {
                    error!("{} could not be run:\n{}", script.display(), e);
                    ScriptRun {
                        script,
                        shown: Vec::new(),
                        relayed: String::new(),
                        faulted: true,
                    }
                }
            };
            if run.faulted {
                report.totals.add_fault();
            }
            report.scripts.push(run);
        }

        Ok(report)
    }

    fn run_script(&self, origin: &WorkdirGuard, script: &Path) -> Result<ScriptRun> {
        // A previous script may have left the directory anywhere
        origin.reset()?;

        let script_abs = origin.original().join(script);
        let script_dir = script_abs
            .parent()
            .ok_or_else(|| Error::Generic(format!("{} has no parent directory", script.display())))?;
        let _scope = WorkdirGuard::enter(script_dir)?;

        info!("Executing {}", script.display());
        let execution = self.executor.execute(&script_abs)?;

        if self.verbosity != Verbosity::Quiet && !execution.stdout.is_empty() {
            print!("{}", execution.stdout);
        }

        let captured = self.filter.capture(&execution.stderr);
        let mut shown = Vec::new();
        let mut relayed = String::new();

        let faulted = match execution.termination {
            Termination::Completed => {
                if !captured.trace.trim().is_empty() {
                    eprintln!("{}", captured.trace);
                    relayed = captured.trace;
                }
                for diagnostic in self.filter.shown(&captured.diagnostics) {
                    show_diagnostic(diagnostic);
                    shown.push(diagnostic.clone());
                }
                false
            }
            Termination::Interrupted => {
                return Err(Error::Interrupted {
                    script: script.display().to_string(),
                })
            }
            Termination::Faulted(code) => {
                error!("{} failed", script.display());
                if captured.trace.trim().is_empty() {
                    show_trace(&match code {
                        Some(code) => format!("exited with status {}", code),
                        None => "terminated by a signal".to_string(),
                    });
                } else {
                    show_trace(&captured.trace);
                }
                true
            }
        };

        Ok(ScriptRun {
            script: script.to_path_buf(),
            shown,
            relayed,
            faulted,
        })
    }
}
