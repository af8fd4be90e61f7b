//! Tests for error messages reported by failing cases

use gallery_harness::{run::run_case, Error};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_failure_reports_file_line_and_context() {
    let temp_dir = TempDir::new().unwrap();
    let case_path = temp_dir.path().join("failing_case.txtar");

    let content = r#"# first check passes
exists present.txt

# this one does not
exists absent.txt
exists present.txt

-- present.txt --
here
"#;

    fs::write(&case_path, content).unwrap();

    let err = run_case(&case_path).unwrap_err();
    assert!(err.is_assertion());

    let message = err.to_string();
    assert!(message.contains("failing_case.txtar"), "{}", message);
    assert!(message.contains("line 5"), "{}", message);
    assert!(message.contains("> 5 | exists absent.txt"), "{}", message);
    assert!(message.contains("'absent.txt' does not exist"), "{}", message);
}

#[test]
fn test_parse_error_context() {
    let temp_dir = TempDir::new().unwrap();
    let case_path = temp_dir.path().join("parse_error.txtar");

    let content = r#"# parse error
exists ok.txt
exec echo "unclosed
exists ok.txt"#;

    fs::write(&case_path, content).unwrap();

    let err = run_case(&case_path).unwrap_err();
    assert!(!err.is_assertion());
    match &err {
        Error::ScriptError {
            line_num, source, ..
        } => {
            assert_eq!(*line_num, 3);
            assert!(matches!(**source, Error::Parse { line: 3, .. }));
        }
        other => panic!("expected a script error, got {:?}", other),
    }
    assert!(err.to_string().contains("unterminated"));
}

#[test]
fn test_unknown_command_is_named() {
    let temp_dir = TempDir::new().unwrap();
    let case_path = temp_dir.path().join("unknown.txtar");
    fs::write(&case_path, "teleport home\n").unwrap();

    let message = run_case(&case_path).unwrap_err().to_string();
    assert!(message.contains("Unknown command: teleport"), "{}", message);
}
