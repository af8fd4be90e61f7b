//! Run totals and the exit policy derived from them

use std::fmt;
use std::ops::AddAssign;

/// Exit status of a clean run
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status when anything failed or errored
pub const EXIT_FAILURE: u8 = 1;

/// Counts aggregated across one invocation
///
/// Counters only grow: runners return their own totals and the caller
/// folds them in with `+=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub total: usize,
    pub failures: usize,
    pub errors: usize,
}

impl RunTotals {
    pub fn new(total: usize, failures: usize, errors: usize) -> Self {
        Self {
            total,
            failures,
            errors,
        }
    }

    pub fn add_attempts(&mut self, count: usize) {
        self.total += count;
    }

    /// An example script fault counts as both a failure and an error
    pub fn add_fault(&mut self) {
        self.failures += 1;
        self.errors += 1;
    }

    pub fn is_clean(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }

    pub fn finalize(&self) -> Summary {
        finalize(self.total, self.failures, self.errors)
    }
}

impl AddAssign for RunTotals {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.failures += other.failures;
        self.errors += other.errors;
    }
}

/// Final message and process exit status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub message: String,
    pub exit_code: u8,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.exit_code == EXIT_SUCCESS
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Derive the summary line and exit status from aggregated counts
pub fn finalize(total: usize, failures: usize, errors: usize) -> Summary {
    let ran = format!("Ran {} tests", total);

    if failures == 0 && errors == 0 {
        return Summary {
            message: format!("{} - OK", ran),
            exit_code: EXIT_SUCCESS,
        };
    }

    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("errors={}", errors));
    }
    if failures > 0 {
        parts.push(format!("failures={}", failures));
    }

    Summary {
        message: format!("{} - FAILED ({})", ran, parts.join(",")),
        exit_code: EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_runs_succeed() {
        for total in [0, 1, 250] {
            let summary = finalize(total, 0, 0);
            assert!(summary.is_success());
            assert_eq!(summary.message, format!("Ran {} tests - OK", total));
        }
    }

    #[test]
    fn test_failures_and_errors_fail() {
        let summary = finalize(2, 1, 1);
        assert_eq!(summary.exit_code, EXIT_FAILURE);
        assert_eq!(summary.message, "Ran 2 tests - FAILED (errors=1,failures=1)");

        assert_eq!(
            finalize(4, 1, 0).message,
            "Ran 4 tests - FAILED (failures=1)"
        );
        assert_eq!(finalize(4, 0, 3).message, "Ran 4 tests - FAILED (errors=3)");
        assert!(!finalize(0, 0, 1).is_success());
    }

    #[test]
    fn test_totals_accumulate() {
        let mut totals = RunTotals::default();
        totals += RunTotals::new(4, 1, 0);

        let mut examples = RunTotals::default();
        examples.add_attempts(2);
        examples.add_fault();
        totals += examples;

        assert_eq!(totals, RunTotals::new(6, 2, 1));
        assert!(!totals.is_clean());
        assert_eq!(totals.finalize().message, "Ran 6 tests - FAILED (errors=1,failures=2)");
    }
}
