use std::fs;

use tempfile::TempDir;

use super::*;
use crate::checker::location::{GroupRef, LocationBound, LocationRange};
use crate::model::Severity;

fn check() -> Check {
    Check::new("Whitespace", "Use spaces around '='.", Severity::Warning)
}

fn file_with(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn rows_and_columns(violations: &[Violation]) -> Vec<(usize, usize)> {
    violations
        .iter()
        .map(|v| {
            let location = v.location.as_ref().unwrap();
            (location.row.unwrap(), location.column.unwrap())
        })
        .collect()
}

#[test]
fn reports_every_match_in_source_order() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "let x=5\nvar y=10");
    let pattern = Pattern::from_source(r"(let|var) \w+=\w+").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file.clone()]);
    let violations = checker.perform_check().unwrap();

    assert_eq!(rows_and_columns(&violations), [(1, 1), (2, 1)]);
    assert_eq!(violations[0].matched_string.as_deref(), Some("let x=5"));
    assert!(violations[0].discover_date <= violations[1].discover_date);
    assert_eq!(
        violations[0].location.as_ref().unwrap().file_path.as_deref(),
        Some(file.as_path())
    );
    assert_eq!(fs::read_to_string(&file).unwrap(), "let x=5\nvar y=10");
}

#[test]
fn autocorrects_and_rewrites_file() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "let x=5\nvar y=10");
    let pattern = Pattern::from_source(r"(let|var) (\w+)=(\w+)").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file.clone()])
        .with_autocorrect(Some("$1 $2 = $3".to_string()), false);
    let violations = checker.perform_check().unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "let x = 5\nvar y = 10");
    let afters: Vec<&str> = violations
        .iter()
        .map(|v| v.applied_auto_correction.as_ref().unwrap().after.as_str())
        .collect();
    assert_eq!(afters, ["let x = 5", "var y = 10"]);
}

#[test]
fn repeated_autocorrection_converges() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "var y = 10000");
    let pattern = Pattern::from_source(r"(?<!\d)(\d+)(\d{3})(?!\d)").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file.clone()])
        .with_autocorrect(Some("$1_$2".to_string()), true);
    let violations = checker.perform_check().unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "var y = 10_000");
    assert_eq!(violations.len(), 1);
}

#[test]
fn repeated_autocorrection_reports_one_violation_per_pass() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "let big = 10000000");
    let pattern = Pattern::from_source(r"(?<!\d)(\d+)(\d{3})(?!\d)").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file.clone()])
        .with_autocorrect(Some("$1_$2".to_string()), true);
    let violations = checker.perform_check().unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "let big = 10_000_000");
    assert_eq!(violations.len(), 2);
}

#[test]
fn pass_limit_stops_non_converging_rules() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.txt", "x");
    let pattern = Pattern::from_source("x$").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file.clone()])
        .with_autocorrect(Some("xx".to_string()), true)
        .with_max_passes(3);
    let violations = checker.perform_check().unwrap();

    assert_eq!(violations.len(), 3);
    assert_eq!(fs::read_to_string(&file).unwrap(), "xxxx");
}

#[test]
fn identical_replacement_is_skipped_silently() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.txt", "let x = 5");
    let pattern = Pattern::from_source(r"(let) (\w+)").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file])
        .with_autocorrect(Some("$1 $2".to_string()), true);

    assert!(checker.perform_check().unwrap().is_empty());
}

#[test]
fn skip_in_file_silences_everything() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "// AnyLint.skipInFile: All\nlet x=5\n");
    let pattern = Pattern::from_source(r"(let|var) \w+=\w+").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file]);
    assert!(checker.perform_check().unwrap().is_empty());
}

#[test]
fn skip_here_silences_same_and_next_line() {
    let dir = TempDir::new().unwrap();
    let content = "let a=1 // AnyLint.skipHere: Whitespace\n\
                   // AnyLint.skipHere: Whitespace\n\
                   let b=2\n\
                   let c=3\n";
    let file = file_with(&dir, "a.swift", content);
    let pattern = Pattern::from_source(r"let \w+=\w+").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file]);
    let violations = checker.perform_check().unwrap();

    assert_eq!(rows_and_columns(&violations), [(4, 1)]);
}

#[test]
fn location_policy_uses_capture_group_bound() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "  let x=5");
    let pattern = Pattern::from_source(r"(let) (?<name>\w+)=").unwrap();
    let location = ViolationLocation {
        range: LocationRange::CaptureGroup(GroupRef::Name("name".to_string())),
        bound: LocationBound::Upper,
    };

    let mut checker =
        FileContentsChecker::new(check(), pattern, vec![file]).with_violation_location(location);
    let violations = checker.perform_check().unwrap();

    assert_eq!(rows_and_columns(&violations), [(1, 8)]);
}

#[test]
fn hint_with_references_becomes_message() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "let x=5");
    let pattern = Pattern::from_source(r"let (?<name>\w+)=").unwrap();
    let check = Check::new("Spacing", "Add spaces around '$name ='.", Severity::Info);

    let mut checker = FileContentsChecker::new(check, pattern, vec![file]);
    let violations = checker.perform_check().unwrap();

    assert_eq!(violations[0].message.as_deref(), Some("Add spaces around 'x ='."));
}

#[test]
fn plain_hint_leaves_message_empty() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "let x=5");
    let pattern = Pattern::from_source(r"let \w+=").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file]);
    assert!(checker.perform_check().unwrap()[0].message.is_none());
}

#[test]
fn literal_dollar_in_hint_is_not_expanded() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.swift", "let price=5");
    let pattern = Pattern::from_source(r"let (\w+)=").unwrap();
    let check = Check::new("Pricing", "Prices above $5 need review.", Severity::Info);

    let mut checker = FileContentsChecker::new(check, pattern, vec![file]);
    assert!(checker.perform_check().unwrap()[0].message.is_none());
}

#[test]
fn unreadable_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    let binary = dir.path().join("blob.bin");
    fs::write(&binary, [0xff, 0xfe, 0x00, b'x']).unwrap();
    let missing = dir.path().join("missing.txt");
    let text = file_with(&dir, "ok.txt", "x");

    let pattern = Pattern::from_source("x").unwrap();
    let mut checker = FileContentsChecker::new(check(), pattern, vec![binary, missing, text]);

    assert_eq!(checker.perform_check().unwrap().len(), 1);
}

#[test]
fn run_records_check_even_without_violations() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "a.txt", "clean");
    let pattern = Pattern::from_source("dirty").unwrap();

    let mut checker = FileContentsChecker::new(check(), pattern, vec![file]);
    let results = checker.run().unwrap();

    assert_eq!(results.all_executed_checks(), [&check()]);
    assert_eq!(results.violations_count(), 0);
}
