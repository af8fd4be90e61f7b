//! Isolated work directory for a single unit test case

use crate::error::{Error, Result};
use crate::parser::CaseFile;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::{Command as StdCommand, Output};
use tempfile::TempDir;

/// Execution state for one case run
pub struct CaseEnvironment {
    /// Root of the case's temporary directory
    pub work_dir: PathBuf,
    /// Removes the directory on drop
    _temp_dir: TempDir,
    /// Variables passed to every `exec` and used for `$VAR` expansion
    pub env_vars: HashMap<String, String>,
    /// Directory `exec` runs in, always inside `work_dir`
    pub current_dir: PathBuf,
    /// Output of the last `exec`
    pub last_output: Option<Output>,
}

impl CaseEnvironment {
    /// Create a fresh environment with `$WORK` pointing at its directory
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let work_dir = temp_dir.path().to_path_buf();

        let mut env_vars = HashMap::new();
        env_vars.insert("WORK".to_string(), work_dir.to_string_lossy().to_string());

        Ok(CaseEnvironment {
            current_dir: work_dir.clone(),
            work_dir,
            _temp_dir: temp_dir,
            env_vars,
            last_output: None,
        })
    }

    /// Write the case's file blocks into the work directory
    pub fn setup_files(&self, files: &[CaseFile]) -> Result<()> {
        for file in files {
            let path = self.resolve(&file.name)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.contents)?;
        }
        Ok(())
    }

    /// Resolve a case-relative path, refusing to escape the work directory
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::usage(
                "path",
                format!("'{}' must stay inside the work directory", path),
            ));
        }
        Ok(self.current_dir.join(relative))
    }

    /// Run a program and remember its output
    pub fn execute(&mut self, program: &str, args: &[String]) -> Result<&Output> {
        let output = StdCommand::new(program)
            .args(args)
            .current_dir(&self.current_dir)
            .envs(&self.env_vars)
            .output()
            .map_err(|e| Error::Generic(format!("cannot run '{}': {}", program, e)))?;
        Ok(&*self.last_output.insert(output))
    }

    /// Captured `stdout` or `stderr` of the last `exec`, trailing whitespace removed
    pub fn last_stream(&self, stream: &str) -> Result<String> {
        let output = self
            .last_output
            .as_ref()
            .ok_or_else(|| Error::usage(stream, "no command has been run"))?;
        let bytes = match stream {
            "stdout" => &output.stdout,
            "stderr" => &output.stderr,
            other => return Err(Error::usage(other, "unknown output stream")),
        };
        Ok(String::from_utf8_lossy(bytes).trim_end().to_string())
    }

    /// Match the last output against a regex
    pub fn match_output(&self, stream: &str, pattern: &str) -> Result<()> {
        let actual = self.last_stream(stream)?;
        let regex = Regex::new(&format!("(?m){}", pattern))
            .map_err(|e| Error::usage(stream, format!("invalid pattern: {}", e)))?;

        if regex.is_match(&actual) {
            Ok(())
        } else {
            Err(Error::assertion(
                stream,
                format!("no match for `{}` in:\n{}", pattern, actual),
            ))
        }
    }

    /// Compare two files byte for byte; `stdout`/`stderr` name the last output
    pub fn compare_files(&self, left: &str, right: &str) -> Result<()> {
        let left_contents = self.read_operand(left)?;
        let right_contents = self.read_operand(right)?;

        if left_contents != right_contents {
            return Err(Error::assertion(
                "cmp",
                format!(
                    "'{}' and '{}' differ:\n{}\n---\n{}",
                    left,
                    right,
                    String::from_utf8_lossy(&left_contents),
                    String::from_utf8_lossy(&right_contents)
                ),
            ));
        }
        Ok(())
    }

    fn read_operand(&self, name: &str) -> Result<Vec<u8>> {
        match (name, &self.last_output) {
            ("stdout", Some(output)) => Ok(output.stdout.clone()),
            ("stderr", Some(output)) => Ok(output.stderr.clone()),
            _ => {
                let path = self.resolve(name)?;
                fs::read(&path).map_err(|e| {
                    Error::Generic(format!("cannot read '{}': {}", name, e))
                })
            }
        }
    }

    /// Move `current_dir` to a directory inside the work directory
    pub fn change_directory(&mut self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        if !target.is_dir() {
            return Err(Error::usage("cd", format!("'{}' is not a directory", path)));
        }
        self.current_dir = target;
        Ok(())
    }

    pub fn set_env_var(&mut self, key: &str, value: &str) {
        self.env_vars.insert(key.to_string(), value.to_string());
    }

    /// Expand `$VAR` and `${VAR}`; unknown variables expand to nothing
    pub fn expand(&self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
                match braced.find('}') {
                    Some(end) => (&braced[..end], end + 2),
                    None => ("", 0),
                }
            } else {
                let end = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                (&after[..end], end)
            };

            if name.is_empty() {
                result.push('$');
                rest = after;
            } else {
                if let Some(value) = self.env_vars.get(name) {
                    result.push_str(value);
                }
                rest = &after[consumed..];
            }
        }

        result.push_str(rest);
        result
    }
}
