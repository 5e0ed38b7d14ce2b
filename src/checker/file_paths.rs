//! Regex matching over a set of file paths, with optional path rewriting.

use std::fs;
use std::path::{Path, PathBuf};

use super::Checker;
use crate::error::{AnyLintError, Result};
use crate::model::{AutoCorrection, Check, Location, Violation};
use crate::pattern::Pattern;
use crate::scanner::{FilesSearch, relative_path_string};

/// How matching paths translate into violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePathsMode {
    /// A single location-less violation when no path matches.
    ViolateIfNoMatches,
    /// One violation per matching path, optionally moving it.
    ViolatePerMatch { autocorrect_replacement: Option<String> },
}

impl FilePathsMode {
    /// # Errors
    /// Returns [`AnyLintError::IncompatibleOptions`] when a presence rule
    /// also declares a replacement.
    pub fn from_options(
        check_id: &str,
        violate_if_no_matches_found: bool,
        autocorrect_replacement: Option<String>,
    ) -> Result<Self> {
        match (violate_if_no_matches_found, autocorrect_replacement) {
            (true, Some(_)) => Err(AnyLintError::IncompatibleOptions {
                check_id: check_id.to_string(),
                message: "violate_if_no_matches_found cannot be combined with \
                          autocorrect_replacement"
                    .to_string(),
            }),
            (true, None) => Ok(Self::ViolateIfNoMatches),
            (false, autocorrect_replacement) => Ok(Self::ViolatePerMatch {
                autocorrect_replacement,
            }),
        }
    }
}

pub struct FilePathsChecker<'a> {
    check: Check,
    pattern: Pattern,
    paths: Vec<PathBuf>,
    mode: FilePathsMode,
    root: PathBuf,
    files_search: &'a mut FilesSearch,
}

impl<'a> FilePathsChecker<'a> {
    #[must_use]
    pub fn new(
        check: Check,
        pattern: Pattern,
        paths: Vec<PathBuf>,
        mode: FilePathsMode,
        files_search: &'a mut FilesSearch,
    ) -> Self {
        Self {
            check,
            pattern,
            paths,
            mode,
            root: PathBuf::from("."),
            files_search,
        }
    }

    /// Match and rewrite paths relative to `root`, as the discovery filters do.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    fn relative_string(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path_string(path), relative_path_string)
    }

    fn on_disk(&self, relative: &str) -> PathBuf {
        if self.root == Path::new(".") {
            PathBuf::from(relative)
        } else {
            self.root.join(relative)
        }
    }

    fn matching_paths(&self) -> Result<Vec<(PathBuf, String)>> {
        let mut matching = Vec::new();
        for path in &self.paths {
            let relative = self.relative_string(path);
            if self.pattern.is_match(&relative)? {
                matching.push((path.clone(), relative));
            }
        }
        Ok(matching)
    }

    fn violations_per_match(&mut self, replacement: Option<&str>) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        for (path, relative) in self.matching_paths()? {
            let violation = Violation::new()
                .with_matched_string(relative.clone())
                .with_location(Location::file(&path));

            let Some(template) = replacement else {
                violations.push(violation);
                continue;
            };
            let target = self.pattern.replace_all_captures(&relative, template)?;
            if target == relative {
                violations.push(violation);
                continue;
            }

            let correction = if move_safely(&path, &self.on_disk(&target))? {
                self.files_search.invalidate_cache();
                Some(AutoCorrection::new(relative, target))
            } else {
                None
            };
            violations.push(violation.with_auto_correction(correction));
        }
        Ok(violations)
    }
}

impl Checker for FilePathsChecker<'_> {
    fn check(&self) -> &Check {
        &self.check
    }

    fn perform_check(&mut self) -> Result<Vec<Violation>> {
        match self.mode.clone() {
            FilePathsMode::ViolateIfNoMatches => {
                if self.matching_paths()?.is_empty() {
                    Ok(vec![Violation::new()])
                } else {
                    Ok(Vec::new())
                }
            }
            FilePathsMode::ViolatePerMatch {
                autocorrect_replacement,
            } => self.violations_per_match(autocorrect_replacement.as_deref()),
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Move `from` to `to`, creating parent directories.
///
/// Returns `false` (with a warning) when the source is gone or a distinct file
/// already occupies the destination. Case-only renames are staged through a
/// temporary sibling so case-insensitive file systems apply them.
fn move_safely(from: &Path, to: &Path) -> Result<bool> {
    if !from.exists() {
        log::warn!("Cannot move {}: file no longer exists", from.display());
        return Ok(false);
    }
    if to.exists() && !is_same_file(from, to) {
        log::warn!(
            "Cannot move {} to {}: destination already exists",
            from.display(),
            to.display()
        );
        return Ok(false);
    }

    let write_error = |source| AnyLintError::FileWrite {
        path: to.to_path_buf(),
        source,
    };
    if let Some(parent) = to.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    if differs_only_in_case(from, to) {
        let staged = staging_path(to);
        fs::rename(from, &staged).map_err(write_error)?;
        fs::rename(&staged, to).map_err(write_error)?;
    } else {
        fs::rename(from, to).map_err(write_error)?;
    }
    log::info!("Moved {} to {}", from.display(), to.display());
    Ok(true)
}

fn differs_only_in_case(from: &Path, to: &Path) -> bool {
    let (from, to) = (from.to_string_lossy(), to.to_string_lossy());
    from != to && from.to_lowercase() == to.to_lowercase()
}

fn staging_path(to: &Path) -> PathBuf {
    let name = to
        .file_name()
        .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
    to.with_file_name(format!(".{name}.anylint-move"))
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    differs_only_in_case(a, b)
}

#[cfg(test)]
#[path = "file_paths_tests.rs"]
mod tests;
