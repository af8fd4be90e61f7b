//! Warning diagnostics captured from example script stderr
//!
//! Scripts report warnings as `<file>:<line>: <Category>: <message>`.
//! The message may run over several lines and is usually followed by the
//! indented source line that raised it. Everything else written to stderr is
//! kept as trace text.

use crate::error::Result;
use regex::Regex;

/// Category of diagnostics raised by the runtime itself
pub const RUNTIME_CATEGORY: &str = "RuntimeWarning";

/// Loading a script outside its package triggers this warning; it is harmless
const BENIGN_IMPORT_PATTERN: &str =
    r"^Parent module '[A-Za-z0-9_]+' not found while handling absolute import";

const HEADER_PATTERN: &str =
    r"^(?P<location>.+?):(?P<line>\d+): (?P<category>[A-Za-z_][A-Za-z0-9_.]*): (?P<message>.*)$";

const TRACEBACK_HEADER: &str = "Traceback (most recent call last):";

/// A single captured warning
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub category: String,
    pub message: String,
    /// Every line belonging to the diagnostic, as captured
    pub text: String,
}

/// Where the previous stderr line left the parser
#[derive(Clone, Copy, PartialEq)]
enum Position {
    Outside,
    Message,
    Source,
}

/// Script stderr split into diagnostics and everything else
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedStderr {
    /// Diagnostics in capture order
    pub diagnostics: Vec<Diagnostic>,
    /// Lines that were not part of a diagnostic
    pub trace: String,
}

/// Splits stderr into diagnostics and decides which ones to show
pub struct DiagnosticFilter {
    header: Regex,
    benign_import: Regex,
}

impl DiagnosticFilter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            header: Regex::new(HEADER_PATTERN)?,
            benign_import: Regex::new(BENIGN_IMPORT_PATTERN)?,
        })
    }

    /// Parse captured stderr
    ///
    /// Unindented lines after a header extend the message until the first
    /// indented source line; after that only indented lines still belong to
    /// the diagnostic. A traceback always ends it.
    pub fn capture(&self, stderr: &str) -> CapturedStderr {
        let mut captured = CapturedStderr::default();
        let mut trace_lines = Vec::new();
        let mut position = Position::Outside;

        for line in stderr.lines() {
            if let Some(caps) = self.header.captures(line) {
                captured.diagnostics.push(Diagnostic {
                    category: caps["category"].to_string(),
                    message: caps["message"].to_string(),
                    text: line.to_string(),
                });
                position = Position::Message;
                continue;
            }

            let indented = line.starts_with(' ') || line.starts_with('\t');
            position = match position {
                Position::Outside => Position::Outside,
                _ if line.starts_with(TRACEBACK_HEADER) => Position::Outside,
                Position::Message if indented => Position::Source,
                Position::Message => Position::Message,
                Position::Source if indented => Position::Source,
                Position::Source => Position::Outside,
            };

            match captured.diagnostics.last_mut() {
                Some(last) if position != Position::Outside => {
                    if position == Position::Message {
                        last.message.push('\n');
                        last.message.push_str(line);
                    }
                    last.text.push('\n');
                    last.text.push_str(line);
                }
                _ => trace_lines.push(line),
            }
        }

        captured.trace = trace_lines.join("\n");
        captured
    }

    /// Whether a diagnostic is the known-harmless import warning
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        diagnostic.category == RUNTIME_CATEGORY && self.benign_import.is_match(&diagnostic.message)
    }

    /// Diagnostics to re-emit, in capture order
    pub fn shown<'a>(&self, diagnostics: &'a [Diagnostic]) -> Vec<&'a Diagnostic> {
        diagnostics
            .iter()
            .filter(|d| !self.is_suppressed(d))
            .collect()
    }
}

/// Re-emit a diagnostic on stderr
#[cfg(not(feature = "colors"))]
pub fn show_diagnostic(diagnostic: &Diagnostic) {
    eprintln!("{}", diagnostic.text);
}

/// Re-emit a diagnostic on stderr
#[cfg(feature = "colors")]
pub fn show_diagnostic(diagnostic: &Diagnostic) {
    write_colored(&diagnostic.text, termcolor::Color::Yellow);
}

/// Print a fault trace on stderr
#[cfg(not(feature = "colors"))]
pub fn show_trace(trace: &str) {
    eprintln!("{}", trace);
}

/// Print a fault trace on stderr
#[cfg(feature = "colors")]
pub fn show_trace(trace: &str) {
    write_colored(trace, termcolor::Color::Red);
}

#[cfg(feature = "colors")]
fn write_colored(text: &str, color: termcolor::Color) {
    use std::io::Write;
    use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)));
    let _ = writeln!(stderr, "{}", text);
    let _ = stderr.reset();
}
