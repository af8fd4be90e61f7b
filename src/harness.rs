//! Top-level orchestration of one invocation

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::gallery::ExampleRunner;
use crate::suite::SuiteRunner;
use crate::totals::{RunTotals, Summary};
use tracing::info;

/// Runs the selected suites in order and aggregates their totals
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run the unit suite and/or the example scripts, unit suite first
    pub fn run(&self) -> Result<RunTotals> {
        let config = &self.config;
        let mut totals = RunTotals::default();

        if config.suites.unit {
            let runner = SuiteRunner::new(&config.case_suffix, config.verbosity);
            let report = runner.run(&config.unit_dir, &config.unit_description);
            totals += RunTotals::from(report.counts);
        }

        if config.suites.examples {
            let runner = ExampleRunner::from_config(config)?;
            totals += runner.run(&config.examples_dir)?.totals;
        }

        Ok(totals)
    }

    /// Run everything and log the final summary
    pub fn execute(&self) -> Result<Summary> {
        let summary = self.run()?.finalize();
        info!("{}", summary);
        Ok(summary)
    }
}
