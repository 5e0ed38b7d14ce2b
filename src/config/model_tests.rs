use super::*;
use crate::checker::{GroupRef, LocationBound, LocationRange};

#[test]
fn empty_config_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.root, PathBuf::from("."));
}

#[test]
fn parses_file_contents_rule() {
    let config: Config = toml::from_str(
        r#"
[[file_contents]]
id = "Whitespace"
hint = "Use spaces around '='."
severity = "warning"
regex = '(let|var) (\w+)=(\w+)'
matching_examples = ["let x=5"]
non_matching_examples = ["let x = 5"]
include_filters = ['\.swift$']
autocorrect_replacement = "$1 $2 = $3"
autocorrect_examples = [{ before = "let x=5", after = "let x = 5" }]
repeat_if_autocorrected = true
"#,
    )
    .unwrap();

    let rule = &config.file_contents[0];
    assert_eq!(rule.check().encode(), "Whitespace@warning: Use spaces around '='.");
    assert_eq!(rule.regex, RegexConfig::Source(r"(let|var) (\w+)=(\w+)".to_string()));
    assert_eq!(rule.autocorrect_replacement.as_deref(), Some("$1 $2 = $3"));
    assert_eq!(rule.autocorrect_examples[0].after, "let x = 5");
    assert!(rule.repeat_if_autocorrected);
    assert_eq!(rule.violation_location, ViolationLocation::default());
}

#[test]
fn severity_defaults_to_error() {
    let config: Config = toml::from_str(
        r#"
[[custom_scripts]]
id = "Script"
hint = "Script must pass."
command = "true"
"#,
    )
    .unwrap();

    assert_eq!(config.custom_scripts[0].severity, Severity::Error);
    assert_eq!(config.custom_scripts[0].timeout_secs, None);
}

#[test]
fn named_fields_keep_declaration_order() {
    let config: Config = toml::from_str(
        r#"
[[file_contents]]
id = "Decl"
hint = "h"
regex = { keyword = "let|var", spacing = " +", name = '\w+', _ = "i" }
"#,
    )
    .unwrap();

    let pattern = config.file_contents[0].regex.compile().unwrap();
    assert_eq!(pattern.named_groups(), ["keyword", "spacing", "name"]);
    assert!(pattern.options().case_insensitive);
    assert!(pattern.is_match("LET  x").unwrap());
}

#[test]
fn parses_violation_location_variants() {
    let config: Config = toml::from_str(
        r#"
[[file_contents]]
id = "A"
hint = "h"
regex = "a"
violation_location = { range = { capture_group = 2 }, bound = "upper" }

[[file_contents]]
id = "B"
hint = "h"
regex = "b"
violation_location = { range = { capture_group = "name" } }

[[file_contents]]
id = "C"
hint = "h"
regex = "c"
violation_location = { range = "full_match" }
"#,
    )
    .unwrap();

    assert_eq!(
        config.file_contents[0].violation_location,
        ViolationLocation {
            range: LocationRange::CaptureGroup(GroupRef::Index(2)),
            bound: LocationBound::Upper,
        }
    );
    assert_eq!(
        config.file_contents[1].violation_location.range,
        LocationRange::CaptureGroup(GroupRef::Name("name".to_string()))
    );
    assert_eq!(
        config.file_contents[2].violation_location,
        ViolationLocation::default()
    );
}

#[test]
fn rule_ids_follow_declaration_order() {
    let config: Config = toml::from_str(
        r#"
[[file_contents]]
id = "Contents"
hint = "h"
regex = "a"

[[file_paths]]
id = "Paths"
hint = "h"
regex = "b"
violate_if_no_matches_found = true

[[custom_scripts]]
id = "Script"
hint = "h"
command = "true"
timeout_secs = 5
"#,
    )
    .unwrap();

    assert_eq!(config.rule_ids(), ["Contents", "Paths", "Script"]);
    assert!(config.file_paths[0].violate_if_no_matches_found);
    assert_eq!(config.custom_scripts[0].timeout_secs, Some(5));
}

#[test]
fn unknown_severity_is_rejected() {
    let result: std::result::Result<Config, _> = toml::from_str(
        r#"
[[custom_scripts]]
id = "Script"
hint = "h"
severity = "fatal"
command = "true"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn compile_filters_reports_invalid_regex() {
    assert_eq!(compile_filters(&[r"\.rs$".to_string()]).unwrap().len(), 1);
    assert!(compile_filters(&["(unclosed".to_string()]).is_err());
}
