//! Unit test case execution

pub mod environment;
pub mod execution;

pub use environment::CaseEnvironment;

use crate::error::Result;
use std::path::Path;

/// Run a single `.txtar` case, returning the first failing command as an error
pub fn run_case(case_path: &Path) -> Result<()> {
    execution::run_case_impl(case_path)
}
