use std::fs;

use crate::cli::InitArgs;
use crate::output::print_error;
use crate::{AnyLintError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes the starter configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(AnyLintError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template()).map_err(|source| {
        AnyLintError::FileWrite {
            path: output_path.clone(),
            source,
        }
    })?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# anylint configuration file
#
# Rules run in this order: file_contents, file_paths, custom_scripts.
# Every regex is line-anchored: ^ and $ match at line boundaries.
# Append \i (case-insensitive), \m (dot matches newline) or both to a regex.

# Directory to lint (default: current directory)
root = "."

[[file_contents]]
id = "TrailingWhitespace"
hint = "Remove trailing whitespace."
severity = "warning"
regex = '[ \t]+$'
matching_examples = ["let x = 5 "]
non_matching_examples = ["let x = 5"]
include_filters = ['\.(rs|swift|kt|py|md)$']
exclude_filters = ['^target/']
autocorrect_replacement = ""
autocorrect_examples = [{ before = "let x = 5  ", after = "let x = 5" }]

# Named fields build the regex from ordered named groups; `_` selects options.
# [[file_contents]]
# id = "EmptyTodo"
# hint = "Describe what '$keyword' refers to."
# regex = { keyword = "TODO|FIXME", rest = ':?\s*$', _ = "i" }
# matching_examples = ["// todo:"]
# violation_location = { range = { capture_group = "keyword" }, bound = "lower" }

[[file_paths]]
id = "Readme"
hint = "Each project should have a README.md file explaining what it is."
regex = '(^|/)README\.md$'
matching_examples = ["README.md", "docs/README.md"]
non_matching_examples = ["README.markdown", "NOTREADME.md"]
violate_if_no_matches_found = true

# Scripts may print a JSON array of violations, a severity-keyed JSON object,
# or nothing: then a non-zero exit status is reported as one violation.
# [[custom_scripts]]
# id = "LintConfig"
# hint = "Lint the lint configuration itself."
# command = "./scripts/check-config.sh"
# timeout_secs = 60
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
