use std::time::Duration;

use tempfile::TempDir;

use super::*;
use crate::model::Severity;

fn check() -> Check {
    Check::new("LintConfig", "The lint config must be valid.", Severity::Error)
}

fn checker(command: &str) -> CustomScriptChecker {
    CustomScriptChecker::new(check(), command, ".")
}

fn output(stdout: &str, success: bool) -> ScriptOutput {
    ScriptOutput {
        stdout: stdout.to_string(),
        stderr: String::new(),
        success,
    }
}

// =============================================================================
// Output interpretation
// =============================================================================

#[test]
fn embedded_results_object_is_taken_whole() {
    let stdout = "Linting...\n\
                  {\"warning\": {\"A@warning: hint\": [{}, {\"matchedString\": \"A\"}]}}\n\
                  done\n";
    let results = checker("true").interpret(&output(stdout, false));

    let checks = results.all_executed_checks();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].id, "A");
    assert_eq!(checks[0].severity, Severity::Warning);

    let violations = results.violations_for(checks[0]);
    assert_eq!(violations.len(), 2);
    assert!(violations[0].location.is_none());
    assert!(violations[0].matched_string.is_none());
    assert_eq!(violations[1].matched_string.as_deref(), Some("A"));
}

#[test]
fn embedded_violation_array_goes_under_invoking_check() {
    let stdout = "[INFO] scanning\n[{\"matchedString\": \"x\"}, {\"message\": \"bad\"}]\n";
    let results = checker("true").interpret(&output(stdout, true));

    let violations = results.violations_for(&check());
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].matched_string.as_deref(), Some("x"));
    assert_eq!(violations[1].message.as_deref(), Some("bad"));
}

#[test]
fn array_of_objects_is_not_mistaken_for_empty_fragment() {
    let stdout = "[{}, {\"matchedString\": \"y\"}]";
    let results = checker("true").interpret(&output(stdout, true));

    assert_eq!(results.violations_for(&check()).len(), 2);
}

#[test]
fn success_without_json_means_no_violations() {
    let results = checker("true").interpret(&output("all good\n", true));

    assert_eq!(results.all_executed_checks(), [&check()]);
    assert_eq!(results.violations_count(), 0);
}

#[test]
fn failure_without_json_reports_last_line() {
    let script_output = ScriptOutput {
        stdout: "checking\nfirst problem\n".to_string(),
        stderr: "fatal: config missing\n\n".to_string(),
        success: false,
    };
    let results = checker("false").interpret(&script_output);

    let violations = results.violations_for(&check());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message.as_deref(), Some("fatal: config missing"));
}

#[test]
fn failure_without_output_reports_bare_violation() {
    let results = checker("false").interpret(&output("", false));

    let violations = results.violations_for(&check());
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.is_none());
}

// =============================================================================
// Execution
// =============================================================================

#[test]
fn run_executes_in_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "").unwrap();

    let mut checker = CustomScriptChecker::new(check(), "test -f marker.txt", dir.path());
    let results = checker.run().unwrap();

    assert_eq!(results.violations_count(), 0);
}

#[test]
fn run_reports_failing_script() {
    let mut checker = checker("echo 'something broke'; exit 3");
    let results = checker.run().unwrap();

    let violations = results.violations_for(&check());
    assert_eq!(violations[0].message.as_deref(), Some("something broke"));
}

#[test]
fn run_parses_printed_json() {
    let mut checker = checker(r#"echo '[{"matchedString": "from script"}]'"#);
    let violations = checker.perform_check().unwrap();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].matched_string.as_deref(), Some("from script"));
}

#[test]
fn timeout_kills_slow_script() {
    let mut checker = checker("sleep 5").with_timeout(Some(Duration::from_millis(200)));
    let err = checker.run().unwrap_err();

    assert!(matches!(err, AnyLintError::CommandTimeout { .. }));
}

#[test]
fn missing_working_directory_fails_to_launch() {
    let mut checker = CustomScriptChecker::new(check(), "true", "/definitely/not/here");
    let err = checker.run().unwrap_err();

    assert!(matches!(err, AnyLintError::CommandLaunch { .. }));
}

#[test]
fn unknown_command_fails_to_launch() {
    let mut checker = checker("anylint-no-such-command-xyz");
    let err = checker.run().unwrap_err();

    assert!(matches!(
        err,
        AnyLintError::CommandLaunch { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound
    ));
}

#[cfg(unix)]
#[test]
fn non_executable_script_fails_to_launch() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("check.sh"), "#!/bin/sh\necho ok\n").unwrap();

    let mut checker = CustomScriptChecker::new(check(), "./check.sh", dir.path());
    let err = checker.run().unwrap_err();

    assert!(matches!(
        err,
        AnyLintError::CommandLaunch { ref source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied
    ));
}
