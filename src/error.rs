//! Error types for gallery-harness

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for harness operations
#[derive(Error, Debug)]
pub enum Error {
    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error in a test case script
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// An expectation in a test case was not met
    #[error("Assertion '{command}' failed: {message}")]
    Assertion { command: String, message: String },

    /// A command was called with the wrong arguments
    #[error("Command '{command}' misused: {message}")]
    Usage { command: String, message: String },

    /// Unknown command error
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    /// An example script was interrupted, ending the whole run
    #[error("Interrupted while running {script}")]
    Interrupted { script: String },

    /// Generic error with message
    #[error("{0}")]
    Generic(String),

    /// Case execution error with context
    #[error("Error in {script_file} at line {line_num}:\n{context}\n{source}")]
    ScriptError {
        script_file: String,
        line_num: usize,
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a parse error
    pub fn parse_error(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an assertion failure
    pub fn assertion(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Assertion {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a usage error
    pub fn usage(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Usage {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Wrap an error with the script location it came from
    pub fn script_error(
        script_file: impl Into<String>,
        line_num: usize,
        script_content: &str,
        source: Error,
    ) -> Self {
        let context = generate_error_context(script_content, line_num);
        Error::ScriptError {
            script_file: script_file.into(),
            line_num,
            context,
            source: Box::new(source),
        }
    }

    /// Whether this error is an unmet expectation rather than an execution fault
    pub fn is_assertion(&self) -> bool {
        match self {
            Error::Assertion { .. } => true,
            Error::ScriptError { source, .. } => source.is_assertion(),
            _ => false,
        }
    }
}

/// Show the lines around `error_line`, marking the failing one
fn generate_error_context(script_content: &str, error_line: usize) -> String {
    let lines: Vec<&str> = script_content.lines().collect();
    let start = error_line.saturating_sub(2).max(1);
    let end = (error_line + 2).min(lines.len());

    (start..=end)
        .map(|line_num| {
            let marker = if line_num == error_line { '>' } else { ' ' };
            let text = lines.get(line_num - 1).copied().unwrap_or("");
            format!("{} {} | {}", marker, line_num, text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
