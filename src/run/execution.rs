//! Command execution for unit test cases

use crate::error::{Error, Result};
use crate::parser::Command;
use crate::run::environment::CaseEnvironment;
use std::fs;
use std::path::Path;

/// Run a case file, returning the first failing command as an error
pub fn run_case_impl(case_path: &Path) -> Result<()> {
    let content = fs::read_to_string(case_path)?;
    let case_file = case_path.to_string_lossy().to_string();

    let case = crate::parser::parse(&content).map_err(|e| match e {
        Error::Parse { line, message } => Error::script_error(
            &case_file,
            line,
            &content,
            Error::Parse { line, message },
        ),
        other => other,
    })?;

    let mut env = CaseEnvironment::new()?;
    env.setup_files(&case.files)?;

    for command in &case.commands {
        execute_command(&mut env, command)
            .map_err(|e| Error::script_error(&case_file, command.line_num, &content, e))?;
    }

    Ok(())
}

/// Execute one command, honouring `!`
///
/// A negated command passes only when the inner command fails an assertion;
/// usage and execution errors still propagate.
fn execute_command(env: &mut CaseEnvironment, command: &Command) -> Result<()> {
    let args: Vec<String> = command.args.iter().map(|a| env.expand(a)).collect();
    let result = execute_command_inner(env, &command.name, &args);

    if !command.negated {
        return result;
    }
    match result {
        Ok(()) => Err(Error::assertion(
            &command.name,
            "expected to fail but succeeded",
        )),
        Err(e) if e.is_assertion() => Ok(()),
        Err(e) => Err(e),
    }
}

fn expect_args(name: &str, args: &[String], min: usize, max: Option<usize>) -> Result<()> {
    let ok = args.len() >= min && max.map_or(true, |max| args.len() <= max);
    if ok {
        return Ok(());
    }
    let expected = match max {
        Some(max) if max == min => format!("exactly {}", min),
        Some(max) => format!("{} to {}", min, max),
        None => format!("at least {}", min),
    };
    Err(Error::usage(
        name,
        format!("expected {} argument(s), got {}", expected, args.len()),
    ))
}

fn execute_command_inner(env: &mut CaseEnvironment, name: &str, args: &[String]) -> Result<()> {
    match name {
        "exec" => {
            expect_args(name, args, 1, None)?;
            let output = env.execute(&args[0], &args[1..])?;
            if !output.status.success() {
                return Err(Error::assertion(
                    "exec",
                    format!(
                        "'{}' exited with {}: {}",
                        args[0],
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    ),
                ));
            }
        }
        "stdout" | "stderr" => {
            expect_args(name, args, 1, Some(1))?;
            env.match_output(name, &args[0])?;
        }
        "cmp" => {
            expect_args(name, args, 2, Some(2))?;
            env.compare_files(&args[0], &args[1])?;
        }
        "exists" => {
            expect_args(name, args, 1, None)?;
            for path in args {
                if !env.resolve(path)?.exists() {
                    return Err(Error::assertion(
                        "exists",
                        format!("'{}' does not exist", path),
                    ));
                }
            }
        }
        "env" => {
            expect_args(name, args, 1, None)?;
            for arg in args {
                let (key, value) = arg
                    .split_once('=')
                    .ok_or_else(|| Error::usage("env", format!("expected KEY=VALUE, got '{}'", arg)))?;
                env.set_env_var(key, value);
            }
        }
        "cd" => {
            expect_args(name, args, 1, Some(1))?;
            env.change_directory(&args[0])?;
        }
        "mkdir" => {
            expect_args(name, args, 1, None)?;
            for dir in args {
                fs::create_dir_all(env.resolve(dir)?)?;
            }
        }
        _ => {
            return Err(Error::UnknownCommand {
                command: name.to_string(),
            });
        }
    }

    Ok(())
}
