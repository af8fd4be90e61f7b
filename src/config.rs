//! Configuration for a harness invocation

use std::path::PathBuf;

/// Environment variable naming the interpreter used for example scripts
pub const INTERPRETER_ENV: &str = "EXAMPLE_INTERPRETER";

/// How much per-case output to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Which suite groups an invocation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteSelection {
    pub unit: bool,
    pub examples: bool,
}

impl SuiteSelection {
    /// Build from explicit flags; nothing selected means unit tests only
    pub fn from_flags(unit: bool, examples: bool) -> Self {
        if !unit && !examples {
            Self::default()
        } else {
            Self { unit, examples }
        }
    }
}

impl Default for SuiteSelection {
    fn default() -> Self {
        Self {
            unit: true,
            examples: false,
        }
    }
}

/// Settings for unit suites and example scripts
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root of the unit test cases
    pub unit_dir: PathBuf,
    /// Name logged when the unit suite starts
    pub unit_description: String,
    /// Suffix of unit test case files
    pub case_suffix: String,
    /// Root of the example script tree
    pub examples_dir: PathBuf,
    /// Suffix that marks a file as an example script
    pub script_suffix: String,
    /// Program that runs each example script
    pub interpreter: String,
    /// Arguments placed before the script path
    pub interpreter_args: Vec<String>,
    pub verbosity: Verbosity,
    pub suites: SuiteSelection,
}

impl HarnessConfig {
    /// Create a config with default settings
    ///
    /// `EXAMPLE_INTERPRETER` overrides the default interpreter.
    pub fn new() -> Self {
        let interpreter = std::env::var(INTERPRETER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "python3".to_string());

        HarnessConfig {
            unit_dir: PathBuf::from("tests/unit"),
            unit_description: "unit tests".to_string(),
            case_suffix: ".txtar".to_string(),
            examples_dir: PathBuf::from("docs/gallery"),
            script_suffix: ".py".to_string(),
            interpreter,
            // Show every warning, not just the first per location
            interpreter_args: vec!["-W".to_string(), "always".to_string()],
            verbosity: Verbosity::default(),
            suites: SuiteSelection::default(),
        }
    }

    pub fn unit_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.unit_dir = dir.into();
        self
    }

    pub fn unit_description(mut self, description: impl Into<String>) -> Self {
        self.unit_description = description.into();
        self
    }

    pub fn case_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.case_suffix = suffix.into();
        self
    }

    pub fn examples_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.examples_dir = dir.into();
        self
    }

    pub fn script_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.script_suffix = suffix.into();
        self
    }

    /// Set the interpreter and its leading arguments
    pub fn interpreter<I, S>(mut self, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interpreter = program.into();
        self.interpreter_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn suites(mut self, suites: SuiteSelection) -> Self {
        self.suites = suites;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_is_unit_only() {
        assert_eq!(
            SuiteSelection::from_flags(false, false),
            SuiteSelection {
                unit: true,
                examples: false
            }
        );
        assert_eq!(
            SuiteSelection::from_flags(false, true),
            SuiteSelection {
                unit: false,
                examples: true
            }
        );
        assert_eq!(
            SuiteSelection::from_flags(true, true),
            SuiteSelection {
                unit: true,
                examples: true
            }
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = HarnessConfig::new()
            .examples_dir("gallery")
            .script_suffix(".sh")
            .interpreter("sh", Vec::<String>::new())
            .verbosity(Verbosity::Quiet);

        assert_eq!(config.examples_dir, PathBuf::from("gallery"));
        assert_eq!(config.script_suffix, ".sh");
        assert_eq!(config.interpreter, "sh");
        assert!(config.interpreter_args.is_empty());
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.unit_dir, PathBuf::from("tests/unit"));
    }
}
