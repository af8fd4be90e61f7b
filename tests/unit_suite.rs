//! Tests for running a unit suite through the result recorder

use gallery_harness::{finalize, RunTotals, SuiteCounts, SuiteRunner, Verbosity};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PASSING: &str = "exists fixture.txt\n\n-- fixture.txt --\nok\n";
const FAILING: &str = "cmp expected.txt actual.txt\n\n-- expected.txt --\n1\n-- actual.txt --\n2\n";

fn write_case(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_three_passing_one_failing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_case(root, "test_a.txtar", PASSING);
    write_case(root, "test_b.txtar", PASSING);
    write_case(root, "nested/test_c.txtar", PASSING);
    write_case(root, "nested/test_d.txtar", FAILING);

    let report = SuiteRunner::new(".txtar", Verbosity::Normal).run(root, "unit tests");
    assert_eq!(
        report.counts,
        SuiteCounts {
            ran: 4,
            failed: 1,
            errored: 0
        }
    );

    let failed: Vec<&str> = report
        .recorder
        .failures()
        .iter()
        .map(|(case, _)| case.name.as_str())
        .collect();
    assert_eq!(failed, vec!["nested/test_d.txtar"]);
    assert_eq!(report.recorder.cases_run().len(), 4);

    let mut totals = RunTotals::default();
    totals += RunTotals::from(report.counts);
    assert_eq!(totals, RunTotals::new(4, 1, 0));
    assert_eq!(finalize(4, 1, 0).exit_code, 1);
}

#[test]
fn test_failing_case_does_not_stop_the_suite() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_case(root, "a_broken.txtar", "exec \"unterminated\n");
    write_case(root, "b_failing.txtar", FAILING);
    write_case(root, "c_passing.txtar", PASSING);

    let report = SuiteRunner::new(".txtar", Verbosity::Quiet).run(root, "unit tests");
    assert_eq!(
        report.counts,
        SuiteCounts {
            ran: 3,
            failed: 1,
            errored: 1
        }
    );
    assert_eq!(report.recorder.successes()[0].name, "c_passing.txtar");
}

#[test]
fn test_empty_and_missing_suites() {
    let temp_dir = TempDir::new().unwrap();
    let runner = SuiteRunner::new(".txtar", Verbosity::Normal);

    let empty = runner.run(temp_dir.path(), "empty suite");
    assert_eq!(empty.counts, SuiteCounts::default());

    let missing = runner.run(&temp_dir.path().join("nope"), "missing suite");
    assert_eq!(missing.counts, SuiteCounts::default());
    assert!(missing.recorder.cases_run().is_empty());
}

#[test]
fn test_custom_case_suffix() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_case(root, "one.case", PASSING);
    write_case(root, "ignored.txtar", FAILING);

    let report = SuiteRunner::new(".case", Verbosity::Normal).run(root, "custom suffix");
    assert_eq!(
        report.counts,
        SuiteCounts {
            ran: 1,
            failed: 0,
            errored: 0
        }
    );
}
