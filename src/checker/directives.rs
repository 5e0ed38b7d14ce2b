//! In-file directives that silence checks.
//!
//! - `AnyLint.skipInFile: All` or `AnyLint.skipInFile: CheckA, CheckB` silences
//!   the listed checks for the whole file.
//! - `AnyLint.skipHere: CheckA` silences matches on its own line and on the
//!   line directly below.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

const ALL_CHECKS: &str = "All";

static SKIP_IN_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AnyLint\.skipInFile:([^\n]*)").expect("Invalid regex"));

static SKIP_HERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AnyLint\.skipHere:([^\n]*)").expect("Invalid regex"));

fn lists_check(list: &str, check_id: &str, allow_all: bool) -> bool {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .any(|token| token == check_id || (allow_all && token == ALL_CHECKS))
}

/// True if a skip-in-file directive names `All` or `check_id`.
#[must_use]
pub fn skips_file(text: &str, check_id: &str) -> bool {
    SKIP_IN_FILE
        .captures_iter(text)
        .any(|caps| lists_check(&caps[1], check_id, true))
}

/// 1-based rows carrying a skip-here directive for `check_id`.
#[derive(Debug, Default)]
pub struct SkipHereRows {
    rows: HashSet<usize>,
}

impl SkipHereRows {
    #[must_use]
    pub fn scan(text: &str, check_id: &str) -> Self {
        let rows = SKIP_HERE
            .captures_iter(text)
            .filter(|caps| lists_check(&caps[1], check_id, false))
            .filter_map(|caps| caps.get(0))
            .map(|directive| text[..directive.start()].matches('\n').count() + 1)
            .collect();
        Self { rows }
    }

    /// A match on `row` is suppressed by a directive on the same row or the
    /// row directly above.
    #[must_use]
    pub fn suppresses(&self, row: usize) -> bool {
        self.rows.contains(&row) || (row > 1 && self.rows.contains(&(row - 1)))
    }
}

#[cfg(test)]
#[path = "directives_tests.rs"]
mod tests;
