//! Regex matching over file contents, with optional in-place autocorrection.

use std::fs;
use std::path::{Path, PathBuf};

use super::Checker;
use super::directives::{self, SkipHereRows};
use super::location::{LineIndex, ViolationLocation};
use crate::error::{AnyLintError, Result};
use crate::model::{AutoCorrection, Check, Location, Violation};
use crate::pattern::Pattern;

/// Upper bound on repeated autocorrection passes over modified files.
pub const MAX_AUTOCORRECT_PASSES: usize = 100;

/// A match that survived suppression, before it becomes a [`Violation`].
struct PendingViolation {
    matched: String,
    row: usize,
    column: usize,
    correction: Option<AutoCorrection>,
    message: Option<String>,
}

#[derive(Default)]
struct PassOutcome {
    violations: Vec<Violation>,
    modified_files: Vec<PathBuf>,
}

pub struct FileContentsChecker {
    check: Check,
    pattern: Pattern,
    files: Vec<PathBuf>,
    violation_location: ViolationLocation,
    autocorrect_replacement: Option<String>,
    repeat_if_autocorrected: bool,
    max_passes: usize,
}

impl FileContentsChecker {
    #[must_use]
    pub fn new(check: Check, pattern: Pattern, files: Vec<PathBuf>) -> Self {
        Self {
            check,
            pattern,
            files,
            violation_location: ViolationLocation::default(),
            autocorrect_replacement: None,
            repeat_if_autocorrected: false,
            max_passes: MAX_AUTOCORRECT_PASSES,
        }
    }

    #[must_use]
    pub fn with_violation_location(mut self, location: ViolationLocation) -> Self {
        self.violation_location = location;
        self
    }

    #[must_use]
    pub fn with_autocorrect(mut self, replacement: Option<String>, repeat: bool) -> Self {
        self.autocorrect_replacement = replacement;
        self.repeat_if_autocorrected = repeat;
        self
    }

    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    fn check_files(&self, files: &[PathBuf]) -> Result<PassOutcome> {
        let mut outcome = PassOutcome::default();
        for path in files {
            let Some((violations, modified)) = self.check_file(path)? else {
                continue;
            };
            outcome.violations.extend(violations);
            if modified {
                outcome.modified_files.push(path.clone());
            }
        }
        Ok(outcome)
    }

    /// Violations of one file and whether the file was rewritten.
    /// `None` when the file could not be read as UTF-8 text.
    fn check_file(&self, path: &Path) -> Result<Option<(Vec<Violation>, bool)>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                return Ok(None);
            }
        };

        if directives::skips_file(&text, &self.check.id) {
            log::debug!("{} skipped in {}", self.check.id, path.display());
            return Ok(Some((Vec::new(), false)));
        }

        let skip_here = SkipHereRows::scan(&text, &self.check.id);
        let lines = LineIndex::new(&text);
        let matches = self.pattern.find_all(&text)?;
        let expands_hint = self.pattern.references_capture_groups(&self.check.hint);

        // Splicing from the last match backwards keeps earlier offsets valid.
        let mut corrected = text.clone();
        let mut pending = Vec::new();
        for found in matches.iter().rev() {
            let offset = self.violation_location.offset(&self.pattern, found);
            let (row, column) = lines.position(offset);
            if skip_here.suppresses(row) {
                continue;
            }

            let correction = match &self.autocorrect_replacement {
                Some(template) => {
                    let replacement = self.pattern.expand(found, template);
                    if replacement == found.as_str() {
                        continue;
                    }
                    corrected.replace_range(found.range(), &replacement);
                    Some(AutoCorrection::new(found.as_str(), replacement))
                }
                None => None,
            };

            pending.push(PendingViolation {
                matched: found.as_str().to_string(),
                row,
                column,
                correction,
                message: expands_hint.then(|| self.pattern.expand(found, &self.check.hint)),
            });
        }
        pending.reverse();

        let modified = corrected != text;
        if modified {
            fs::write(path, &corrected).map_err(|source| AnyLintError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let violations = pending
            .into_iter()
            .map(|p| {
                let violation = Violation::new()
                    .with_matched_string(p.matched)
                    .with_location(Location::position(path, p.row, p.column))
                    .with_auto_correction(p.correction);
                match p.message {
                    Some(message) => violation.with_message(message),
                    None => violation,
                }
            })
            .collect();
        Ok(Some((violations, modified)))
    }
}

impl Checker for FileContentsChecker {
    fn check(&self) -> &Check {
        &self.check
    }

    fn perform_check(&mut self) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        let mut files = self.files.clone();

        for pass in 1..=self.max_passes {
            let outcome = self.check_files(&files)?;
            let autocorrected = outcome
                .violations
                .iter()
                .any(|violation| violation.applied_auto_correction.is_some());
            violations.extend(outcome.violations);

            if !self.repeat_if_autocorrected || !autocorrected {
                return Ok(violations);
            }
            log::debug!(
                "{}: pass {pass} modified {} file(s), repeating",
                self.check.id,
                outcome.modified_files.len()
            );
            files = outcome.modified_files;
        }

        log::warn!(
            "{}: autocorrection did not converge after {} passes",
            self.check.id,
            self.max_passes
        );
        Ok(violations)
    }
}

#[cfg(test)]
#[path = "file_contents_tests.rs"]
mod tests;
