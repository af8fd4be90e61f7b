//! Discovery and execution of a unit test suite

use crate::config::Verbosity;
use crate::recorder::{CaseRecord, Outcome, ResultRecorder};
use crate::run;
use crate::totals::RunTotals;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Counts returned by one suite run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteCounts {
    pub ran: usize,
    pub failed: usize,
    pub errored: usize,
}

impl From<SuiteCounts> for RunTotals {
    fn from(counts: SuiteCounts) -> Self {
        RunTotals::new(counts.ran, counts.failed, counts.errored)
    }
}

/// Result of running a suite
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub counts: SuiteCounts,
    pub recorder: ResultRecorder,
}

/// Runs every case found under a directory
pub struct SuiteRunner {
    case_suffix: String,
    verbosity: Verbosity,
}

impl SuiteRunner {
    pub fn new(case_suffix: impl Into<String>, verbosity: Verbosity) -> Self {
        Self {
            case_suffix: case_suffix.into(),
            verbosity,
        }
    }

    /// Discover and run all cases under `directory`
    ///
    /// A missing directory is logged and yields an empty report.
    pub fn run(&self, directory: &Path, description: &str) -> SuiteReport {
        info!("running {}", description);

        if !directory.is_dir() {
            error!(
                "test directory {} does not exist, no cases run",
                directory.display()
            );
            return SuiteReport::default();
        }

        let mut recorder = ResultRecorder::new();
        for path in self.discover(directory) {
            let case = CaseRecord {
                name: path
                    .strip_prefix(directory)
                    .unwrap_or(&path)
                    .display()
                    .to_string(),
                path,
            };
            let outcome = match run::run_case(&case.path) {
                Ok(()) => Outcome::Success,
                Err(e) if e.is_assertion() => Outcome::Failure(e.to_string()),
                Err(e) => Outcome::Error(e.to_string()),
            };
            self.report_case(&case, &outcome);
            recorder.record(case, outcome);
        }

        let counts = SuiteCounts {
            ran: recorder.tests_run(),
            failed: recorder.failures().len(),
            errored: recorder.errors().len(),
        };
        SuiteReport { counts, recorder }
    }

    /// Case files under `directory`, sorted for a stable order
    pub fn discover(&self, directory: &Path) -> Vec<PathBuf> {
        let mut cases: Vec<PathBuf> = WalkDir::new(directory)
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
                    .is_some_and(|name| name.ends_with(&self.case_suffix))
            })
            .map(|entry| entry.into_path())
            .collect();

        cases.sort();
        cases
    }

    /// Whether an outcome gets a log line; failure details survive `Quiet`
    fn reports(&self, outcome: &Outcome) -> bool {
        match outcome {
            Outcome::Success => self.verbosity == Verbosity::Verbose,
            Outcome::Failure(_) | Outcome::Error(_) => true,
        }
    }

    fn report_case(&self, case: &CaseRecord, outcome: &Outcome) {
        if !self.reports(outcome) {
            return;
        }
        match outcome {
            Outcome::Success => info!("{} ... ok", case.name),
            Outcome::Failure(message) => error!("FAIL: {}\n{}", case.name, message),
            Outcome::Error(message) => error!("ERROR: {}\n{}", case.name, message),
        }
    }
}
