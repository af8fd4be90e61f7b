//! # gallery-harness
//!
//! Runs a project's unit test cases and its example gallery scripts, and
//! reduces the outcome to a single summary line and exit status for CI.
//!
//! Unit test cases are `.txtar` scripts run in throwaway work directories.
//! Example scripts are run one by one from their own directory with their
//! warnings captured; a broken example is counted, never fatal.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod gallery;
pub mod harness;
pub mod logging;
pub mod parser;
pub mod recorder;
pub mod run;
pub mod suite;
pub mod totals;
pub mod workdir;

pub use config::{HarnessConfig, SuiteSelection, Verbosity};
pub use error::{Error, Result};
pub use executor::{Execution, ProcessExecutor, ScriptExecutor, Termination};
pub use gallery::{ExampleReport, ExampleRunner, ScriptRun};
pub use harness::Harness;
pub use recorder::{CaseRecord, Outcome, ResultRecorder};
pub use suite::{SuiteCounts, SuiteReport, SuiteRunner};
pub use totals::{finalize, RunTotals, Summary, EXIT_FAILURE, EXIT_SUCCESS};
pub use workdir::WorkdirGuard;

use std::path::Path;

/// Run every unit test case under `directory`
///
/// # Examples
///
/// ```no_run
/// use gallery_harness::{run_test_suite, Verbosity};
/// use std::path::Path;
///
/// let report = run_test_suite(Path::new("tests/unit"), "unit tests", Verbosity::Normal);
/// println!("{} run, {} failed", report.counts.ran, report.counts.failed);
/// ```
pub fn run_test_suite(directory: &Path, description: &str, verbosity: Verbosity) -> SuiteReport {
    SuiteRunner::new(".txtar", verbosity).run(directory, description)
}

/// Run every example script under `root` with the configured interpreter
///
/// # Examples
///
/// ```no_run
/// use gallery_harness::{run_examples, HarnessConfig};
/// use std::path::Path;
///
/// let config = HarnessConfig::new();
/// let report = run_examples(Path::new("docs/gallery"), &config).unwrap();
/// println!("{}", report.totals.finalize());
/// ```
pub fn run_examples(root: &Path, config: &HarnessConfig) -> Result<ExampleReport> {
    ExampleRunner::from_config(config)?.run(root)
}
