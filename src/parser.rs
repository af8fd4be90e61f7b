//! Parser for `.txtar` unit test cases
//!
//! A case consists of command lines at the top followed by optional file
//! blocks, each introduced by a `-- name --` header line.

use crate::error::{Error, Result};

/// A file block that is written into the case's work directory
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFile {
    /// Relative path from the `-- name --` header
    pub name: String,
    /// File contents
    pub contents: Vec<u8>,
}

/// A single command line
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// The command name (first word)
    pub name: String,
    /// Command arguments, unquoted
    pub args: Vec<String>,
    /// 1-based line number in the case file
    pub line_num: usize,
    /// Whether the command is expected to fail (`! cmd`)
    pub negated: bool,
}

/// A parsed test case
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Case {
    pub commands: Vec<Command>,
    pub files: Vec<CaseFile>,
}

/// Parse the contents of a `.txtar` case
pub fn parse(content: &str) -> Result<Case> {
    let mut case = Case::default();
    let mut current: Option<CaseFile> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;

        if let Some(name) = file_header(line) {
            if let Some(file) = current.take() {
                case.files.push(finish_file(file));
            }
            current = Some(CaseFile {
                name,
                contents: Vec::new(),
            });
            continue;
        }

        if let Some(file) = current.as_mut() {
            file.contents.extend_from_slice(line.as_bytes());
            file.contents.push(b'\n');
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = tokenize(trimmed).map_err(|msg| Error::parse_error(line_num, msg))?;
        let negated = tokens.first().map(String::as_str) == Some("!");
        if negated {
            tokens.remove(0);
        }
        if tokens.is_empty() {
            return Err(Error::parse_error(line_num, "! requires a command"));
        }
        let name = tokens.remove(0);

        case.commands.push(Command {
            name,
            args: tokens,
            line_num,
            negated,
        });
    }

    if let Some(file) = current.take() {
        case.files.push(finish_file(file));
    }

    Ok(case)
}

/// Blank lines between blocks are not part of the preceding file
fn finish_file(mut file: CaseFile) -> CaseFile {
    while file.contents.ends_with(b"\n\n") {
        file.contents.pop();
    }
    file
}

fn file_header(line: &str) -> Option<String> {
    let name = line.trim().strip_prefix("-- ")?.strip_suffix(" --")?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Split a command line into words, honouring single and double quotes
fn tokenize(input: &str) -> std::result::Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    // A quoted empty string still counts as a token
    let mut pending = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') => match chars.next() {
                Some('n') => current.push('\n'),
                Some('t') => current.push('\t'),
                Some(other) => current.push(other),
                None => return Err("trailing backslash".to_string()),
            },
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                pending = true;
            }
            (None, ' ' | '\t') => {
                if pending || !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            (None, c) => current.push(c),
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if pending || !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}
