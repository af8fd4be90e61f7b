//! End-to-end tests for a full harness invocation

use gallery_harness::{Harness, HarnessConfig, RunTotals, SuiteSelection, Verbosity};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

// Example runs change the working directory
static CWD_LOCK: Mutex<()> = Mutex::new(());

fn lock_cwd() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn project(root: &Path) -> HarnessConfig {
    let unit = root.join("tests/unit");
    let gallery = root.join("docs/gallery");
    fs::create_dir_all(&unit).unwrap();
    fs::create_dir_all(gallery.join("plots")).unwrap();

    fs::write(unit.join("reads.txtar"), "exists in.txt\n-- in.txt --\nx\n").unwrap();
    fs::write(unit.join("compares.txtar"), "cmp a b\n-- a --\n1\n-- b --\n1\n").unwrap();
    fs::write(gallery.join("intro.sh"), "echo intro\n").unwrap();
    fs::write(gallery.join("plots/line.sh"), "echo 'line plot'\n").unwrap();

    HarnessConfig::new()
        .unit_dir(unit)
        .examples_dir(gallery)
        .script_suffix(".sh")
        .interpreter("sh", Vec::<String>::new())
        .verbosity(Verbosity::Quiet)
}

#[test]
fn test_default_selection_skips_examples() {
    let _lock = lock_cwd();
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(project(temp_dir.path()));

    assert_eq!(harness.run().unwrap(), RunTotals::new(2, 0, 0));
    let summary = harness.execute().unwrap();
    assert_eq!(summary.message, "Ran 2 tests - OK");
    assert_eq!(summary.exit_code, 0);
}

#[cfg(unix)]
#[test]
fn test_both_suites_aggregate() {
    let _lock = lock_cwd();
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path()).suites(SuiteSelection::from_flags(true, true));
    fs::write(config.unit_dir.join("broken.txtar"), "cmp a b\n-- a --\n1\n-- b --\n2\n").unwrap();
    fs::write(config.examples_dir.join("plots/bar.sh"), "exit 2\n").unwrap();

    let summary = Harness::new(config).execute().unwrap();
    assert_eq!(summary.message, "Ran 6 tests - FAILED (errors=1,failures=2)");
    assert_eq!(summary.exit_code, 1);
}

#[cfg(unix)]
#[test]
fn test_examples_only() {
    let _lock = lock_cwd();
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path()).suites(SuiteSelection::from_flags(false, true));

    let totals = Harness::new(config).run().unwrap();
    assert_eq!(totals, RunTotals::new(2, 0, 0));
}

#[test]
fn test_missing_directories_report_zero() {
    let _lock = lock_cwd();
    let temp_dir = TempDir::new().unwrap();
    let config = HarnessConfig::new()
        .unit_dir(temp_dir.path().join("no-unit"))
        .examples_dir(temp_dir.path().join("no-gallery"))
        .suites(SuiteSelection::from_flags(true, true));

    let summary = Harness::new(config).execute().unwrap();
    assert_eq!(summary.message, "Ran 0 tests - OK");
    assert!(summary.is_success());
}
