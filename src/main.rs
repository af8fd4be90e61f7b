//! gallery-harness CLI entry point

use anyhow::Context;
use clap::{ArgAction, Parser};
use gallery_harness::{Error, Harness, HarnessConfig, SuiteSelection, Verbosity};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Conventional status for a run stopped by SIGINT
const EXIT_INTERRUPTED: u8 = 130;

/// Run unit test cases and example gallery scripts
#[derive(Parser, Debug)]
#[command(name = "gallery-harness", version, about)]
struct Cli {
    /// Run in verbose mode
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Run with per-case output disabled
    #[arg(short, long)]
    quiet: bool,

    /// Run the unit test cases
    #[arg(short, long)]
    unit: bool,

    /// Run the example scripts
    #[arg(short, long)]
    example: bool,

    /// Root directory of the unit test cases
    #[arg(long, env = "HARNESS_UNIT_DIR", default_value = "tests/unit")]
    unit_dir: PathBuf,

    /// Root directory of the example scripts
    #[arg(long, env = "HARNESS_EXAMPLES_DIR", default_value = "docs/gallery")]
    examples_dir: PathBuf,

    /// File suffix of unit test cases
    #[arg(long, default_value = ".txtar")]
    case_suffix: String,

    /// File suffix of example scripts
    #[arg(long, default_value = ".py")]
    script_suffix: String,

    /// Program used to run each example script
    #[arg(long, env = gallery_harness::config::INTERPRETER_ENV)]
    interpreter: Option<String>,

    /// Argument passed to the interpreter before the script path (repeatable)
    #[arg(long = "interpreter-arg", action = ArgAction::Append, allow_hyphen_values = true)]
    interpreter_args: Vec<String>,
}

impl Cli {
    fn into_config(self) -> HarnessConfig {
        let verbosity = if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        };

        let mut config = HarnessConfig::new()
            .unit_dir(self.unit_dir)
            .examples_dir(self.examples_dir)
            .case_suffix(self.case_suffix)
            .script_suffix(self.script_suffix)
            .verbosity(verbosity)
            .suites(SuiteSelection::from_flags(self.unit, self.example));

        if self.interpreter.is_some() || !self.interpreter_args.is_empty() {
            let program = self.interpreter.unwrap_or(config.interpreter.clone());
            let args = if self.interpreter_args.is_empty() {
                config.interpreter_args.clone()
            } else {
                self.interpreter_args
            };
            config = config.interpreter(program, args);
        }

        config
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let harness = Harness::new(cli.into_config());
    match harness.execute() {
        Ok(summary) => Ok(ExitCode::from(summary.exit_code)),
        Err(Error::Interrupted { script }) => {
            error!("interrupted while running {}", script);
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
        Err(e) => Err(e).context("test harness failed"),
    }
}

fn main() -> ExitCode {
    gallery_harness::logging::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(gallery_harness::EXIT_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_unit_tests_only() {
        let config = Cli::parse_from(["gallery-harness"]).into_config();
        assert!(config.suites.unit);
        assert!(!config.suites.examples);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_example_flag_alone_skips_unit_tests() {
        let config = Cli::parse_from(["gallery-harness", "-e", "-q"]).into_config();
        assert!(!config.suites.unit);
        assert!(config.suites.examples);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_interpreter_override() {
        let config = Cli::parse_from([
            "gallery-harness",
            "--interpreter",
            "python3.12",
            "--interpreter-arg",
            "-X",
            "--interpreter-arg",
            "dev",
        ])
        .into_config();
        assert_eq!(config.interpreter, "python3.12");
        assert_eq!(config.interpreter_args, vec!["-X", "dev"]);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["gallery-harness", "-v", "-q"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
