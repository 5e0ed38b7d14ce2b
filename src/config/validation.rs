//! Rule validation performed before any file is scanned.
//!
//! Examples declared on a rule are executable documentation: every matching
//! example must match, every non-matching example must not, and every
//! autocorrect example must be reproduced exactly by the replacement.

use std::collections::HashSet;

use crate::config::{AutoCorrectExample, Config};
use crate::pattern::Pattern;
use crate::{AnyLintError, Result};

/// Reject empty and duplicate rule ids.
///
/// # Errors
/// Returns `Config` naming the first offending id.
pub fn validate_rule_ids(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();
    for id in config.rule_ids() {
        if id.trim().is_empty() {
            return Err(AnyLintError::Config("rule id must not be empty".to_string()));
        }
        if id.contains('@') || id.contains(':') {
            return Err(AnyLintError::Config(format!(
                "rule id '{id}' must not contain '@' or ':'"
            )));
        }
        if !seen.insert(id) {
            return Err(AnyLintError::Config(format!("duplicate rule id '{id}'")));
        }
    }
    Ok(())
}

/// Check `pattern` against the rule's matching and non-matching examples.
///
/// # Errors
/// Returns `ExampleMismatch` for the first example that disagrees.
pub fn validate_examples(
    check_id: &str,
    pattern: &Pattern,
    matching: &[String],
    non_matching: &[String],
) -> Result<()> {
    for example in matching {
        if !pattern.is_match(example)? {
            return Err(mismatch(
                check_id,
                format!("matching example '{example}' is not matched by '{pattern}'"),
            ));
        }
    }
    for example in non_matching {
        if pattern.is_match(example)? {
            return Err(mismatch(
                check_id,
                format!("non-matching example '{example}' is matched by '{pattern}'"),
            ));
        }
    }
    Ok(())
}

/// Check that `replacement` turns every example's `before` into its `after`.
///
/// Examples without a replacement cannot be verified and only log a warning.
///
/// # Errors
/// Returns `ExampleMismatch` for the first example that is not reproduced.
pub fn validate_autocorrect_examples(
    check_id: &str,
    pattern: &Pattern,
    replacement: Option<&str>,
    examples: &[AutoCorrectExample],
) -> Result<()> {
    let Some(replacement) = replacement else {
        if !examples.is_empty() {
            log::warn!("{check_id}: autocorrect_examples given without autocorrect_replacement");
        }
        return Ok(());
    };

    for example in examples {
        let corrected = pattern.replace_all_captures(&example.before, replacement)?;
        if corrected != example.after {
            return Err(mismatch(
                check_id,
                format!(
                    "autocorrect example '{}' became '{corrected}', expected '{}'",
                    example.before, example.after
                ),
            ));
        }
    }
    Ok(())
}

fn mismatch(check_id: &str, message: String) -> AnyLintError {
    AnyLintError::ExampleMismatch {
        check_id: check_id.to_string(),
        message,
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
