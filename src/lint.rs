//! Top-level driver: prepares every rule of a [`Config`], then runs them in
//! declaration order (file contents, file paths, custom scripts).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::checker::{
    Checker, CustomScriptChecker, FileContentsChecker, FilePathsChecker, FilePathsMode,
    ViolationLocation,
};
use crate::config::{
    Config, compile_filters, validate_autocorrect_examples, validate_examples, validate_rule_ids,
};
use crate::model::{Check, LintResults};
use crate::pattern::Pattern;
use crate::scanner::FilesSearch;
use crate::{AnyLintError, Result};

/// A validated rule with its patterns compiled.
#[derive(Debug)]
enum PreparedRule {
    FileContents {
        check: Check,
        pattern: Pattern,
        include: Vec<Pattern>,
        exclude: Vec<Pattern>,
        autocorrect_replacement: Option<String>,
        repeat_if_autocorrected: bool,
        violation_location: ViolationLocation,
    },
    FilePaths {
        check: Check,
        pattern: Pattern,
        include: Vec<Pattern>,
        exclude: Vec<Pattern>,
        mode: FilePathsMode,
    },
    CustomScript {
        check: Check,
        command: String,
        timeout: Option<Duration>,
    },
}

impl PreparedRule {
    const fn check(&self) -> &Check {
        match self {
            Self::FileContents { check, .. }
            | Self::FilePaths { check, .. }
            | Self::CustomScript { check, .. } => check,
        }
    }
}

#[derive(Debug)]
pub struct Linter {
    root: PathBuf,
    rules: Vec<PreparedRule>,
    files_search: FilesSearch,
}

impl Linter {
    /// Compile and validate every rule of `config`.
    ///
    /// Nothing is scanned or modified when this fails.
    ///
    /// # Errors
    /// Returns the first configuration problem: a duplicate id, an invalid
    /// regex, an example the pattern disagrees with, or incompatible options.
    pub fn new(config: &Config) -> Result<Self> {
        validate_rule_ids(config)?;
        let mut rules = Vec::new();

        for rule in &config.file_contents {
            let pattern = rule.regex.compile()?;
            validate_examples(
                &rule.id,
                &pattern,
                &rule.matching_examples,
                &rule.non_matching_examples,
            )?;
            validate_autocorrect_examples(
                &rule.id,
                &pattern,
                rule.autocorrect_replacement.as_deref(),
                &rule.autocorrect_examples,
            )?;
            rules.push(PreparedRule::FileContents {
                check: rule.check(),
                pattern,
                include: compile_filters(&rule.include_filters)?,
                exclude: compile_filters(&rule.exclude_filters)?,
                autocorrect_replacement: rule.autocorrect_replacement.clone(),
                repeat_if_autocorrected: rule.repeat_if_autocorrected,
                violation_location: rule.violation_location.clone(),
            });
        }

        for rule in &config.file_paths {
            let pattern = rule.regex.compile()?;
            let mode = FilePathsMode::from_options(
                &rule.id,
                rule.violate_if_no_matches_found,
                rule.autocorrect_replacement.clone(),
            )?;
            validate_examples(
                &rule.id,
                &pattern,
                &rule.matching_examples,
                &rule.non_matching_examples,
            )?;
            validate_autocorrect_examples(
                &rule.id,
                &pattern,
                rule.autocorrect_replacement.as_deref(),
                &rule.autocorrect_examples,
            )?;
            rules.push(PreparedRule::FilePaths {
                check: rule.check(),
                pattern,
                include: compile_filters(&rule.include_filters)?,
                exclude: compile_filters(&rule.exclude_filters)?,
                mode,
            });
        }

        for rule in &config.custom_scripts {
            if rule.command.trim().is_empty() {
                return Err(AnyLintError::Config(format!(
                    "custom script '{}' has an empty command",
                    rule.id
                )));
            }
            rules.push(PreparedRule::CustomScript {
                check: rule.check(),
                command: rule.command.clone(),
                timeout: rule.timeout_secs.map(Duration::from_secs),
            });
        }

        log::debug!("Prepared {} rule(s)", rules.len());
        Ok(Self {
            root: config.root.clone(),
            rules,
            files_search: FilesSearch::new(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Checks in execution order.
    #[must_use]
    pub fn checks(&self) -> Vec<&Check> {
        self.rules.iter().map(PreparedRule::check).collect()
    }

    /// Run every rule and aggregate the results.
    ///
    /// # Errors
    /// Returns the first fatal error; results of earlier rules are discarded.
    pub fn run(&mut self) -> Result<LintResults> {
        let mut results = LintResults::new();

        for rule in &self.rules {
            let fragment = match rule {
                PreparedRule::FileContents {
                    check,
                    pattern,
                    include,
                    exclude,
                    autocorrect_replacement,
                    repeat_if_autocorrected,
                    violation_location,
                } => {
                    let files = self.files_search.all_files(&self.root, include, exclude)?;
                    log::debug!("{}: checking {} file(s)", check.id, files.len());
                    FileContentsChecker::new(check.clone(), pattern.clone(), files)
                        .with_violation_location(violation_location.clone())
                        .with_autocorrect(
                            autocorrect_replacement.clone(),
                            *repeat_if_autocorrected,
                        )
                        .run()?
                }
                PreparedRule::FilePaths {
                    check,
                    pattern,
                    include,
                    exclude,
                    mode,
                } => {
                    let paths = self.files_search.all_files(&self.root, include, exclude)?;
                    log::debug!("{}: checking {} path(s)", check.id, paths.len());
                    FilePathsChecker::new(
                        check.clone(),
                        pattern.clone(),
                        paths,
                        mode.clone(),
                        &mut self.files_search,
                    )
                    .with_root(self.root.clone())
                    .run()?
                }
                PreparedRule::CustomScript {
                    check,
                    command,
                    timeout,
                } => CustomScriptChecker::new(check.clone(), command.clone(), &self.root)
                    .with_timeout(*timeout)
                    .run()?,
            };

            log::info!(
                "{}: {} violation(s)",
                rule.check().id,
                fragment.violations_count()
            );
            results.merge(fragment);
        }

        Ok(results)
    }
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
