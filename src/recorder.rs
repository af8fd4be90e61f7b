//! Per-suite record of case outcomes

use std::path::PathBuf;

/// A case that has been run
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    /// Display name, relative to the suite directory
    pub name: String,
    pub path: PathBuf,
}

/// Outcome of a single case
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success,
    /// An expectation was not met
    Failure(String),
    /// The case could not run to completion
    Error(String),
}

/// Collects successes, failures and errors as cases complete
///
/// Recording never fails; errored cases are kept apart from the
/// succeeded/failed set returned by [`ResultRecorder::cases_run`].
#[derive(Debug, Default)]
pub struct ResultRecorder {
    successes: Vec<CaseRecord>,
    failures: Vec<(CaseRecord, String)>,
    errors: Vec<(CaseRecord, String)>,
}

impl ResultRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, case: CaseRecord, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.successes.push(case),
            Outcome::Failure(message) => self.failures.push((case, message)),
            Outcome::Error(message) => self.errors.push((case, message)),
        }
    }

    pub fn successes(&self) -> &[CaseRecord] {
        &self.successes
    }

    pub fn failures(&self) -> &[(CaseRecord, String)] {
        &self.failures
    }

    pub fn errors(&self) -> &[(CaseRecord, String)] {
        &self.errors
    }

    /// Every case that succeeded or failed, successes first
    pub fn cases_run(&self) -> Vec<&CaseRecord> {
        self.successes
            .iter()
            .chain(self.failures.iter().map(|(case, _)| case))
            .collect()
    }

    /// Number of cases recorded, errors included
    pub fn tests_run(&self) -> usize {
        self.successes.len() + self.failures.len() + self.errors.len()
    }
}
