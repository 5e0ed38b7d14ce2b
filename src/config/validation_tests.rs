use super::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn config(toml_text: &str) -> Config {
    toml::from_str(toml_text).unwrap()
}

// =============================================================================
// Rule ids
// =============================================================================

#[test]
fn unique_ids_pass() {
    let config = config(
        r#"
[[file_contents]]
id = "A"
hint = "h"
regex = "a"

[[custom_scripts]]
id = "B"
hint = "h"
command = "true"
"#,
    );
    assert!(validate_rule_ids(&config).is_ok());
}

#[test]
fn duplicate_ids_across_kinds_fail() {
    let config = config(
        r#"
[[file_contents]]
id = "Same"
hint = "h"
regex = "a"

[[file_paths]]
id = "Same"
hint = "h"
regex = "b"
"#,
    );
    let err = validate_rule_ids(&config).unwrap_err();
    assert!(err.to_string().contains("duplicate rule id 'Same'"));
}

#[test]
fn ids_that_break_check_encoding_fail() {
    let config = config(
        r#"
[[file_contents]]
id = "A@b"
hint = "h"
regex = "a"
"#,
    );
    assert!(matches!(
        validate_rule_ids(&config),
        Err(AnyLintError::Config(_))
    ));
}

// =============================================================================
// Examples
// =============================================================================

#[test]
fn agreeing_examples_pass() {
    let pattern = Pattern::from_source(r"(let|var) \w+=\w+").unwrap();
    let result = validate_examples(
        "Whitespace",
        &pattern,
        &strings(&["let x=5", "var y=10"]),
        &strings(&["let x = 5"]),
    );
    assert!(result.is_ok());
}

#[test]
fn unmatched_matching_example_fails() {
    let pattern = Pattern::from_source(r"let \w+=\w+").unwrap();
    let err = validate_examples("Whitespace", &pattern, &strings(&["var y=10"]), &[]).unwrap_err();

    match err {
        AnyLintError::ExampleMismatch { check_id, message } => {
            assert_eq!(check_id, "Whitespace");
            assert!(message.contains("var y=10"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn matched_non_matching_example_fails() {
    let pattern = Pattern::from_source(r"let \w+").unwrap();
    let result = validate_examples("A", &pattern, &[], &strings(&["let x = 5"]));
    assert!(matches!(result, Err(AnyLintError::ExampleMismatch { .. })));
}

// =============================================================================
// Autocorrect examples
// =============================================================================

#[test]
fn reproduced_autocorrect_examples_pass() {
    let pattern = Pattern::from_source(r"(let|var) (\w+)=(\w+)").unwrap();
    let examples = [AutoCorrectExample {
        before: "let x=5".to_string(),
        after: "let x = 5".to_string(),
    }];
    assert!(validate_autocorrect_examples("A", &pattern, Some("$1 $2 = $3"), &examples).is_ok());
}

#[test]
fn wrong_autocorrect_example_fails() {
    let pattern = Pattern::from_source(r"(let|var) (\w+)=(\w+)").unwrap();
    let examples = [AutoCorrectExample {
        before: "let x=5".to_string(),
        after: "let x= 5".to_string(),
    }];
    let err = validate_autocorrect_examples("A", &pattern, Some("$1 $2 = $3"), &examples)
        .unwrap_err();
    assert!(err.to_string().contains("failed example validation"));
}

#[test]
fn autocorrect_examples_without_replacement_only_warn() {
    let pattern = Pattern::from_source("a").unwrap();
    let examples = [AutoCorrectExample {
        before: "a".to_string(),
        after: "b".to_string(),
    }];
    assert!(validate_autocorrect_examples("A", &pattern, None, &examples).is_ok());
}
