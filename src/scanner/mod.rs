//! File discovery with a per-run memo.
//!
//! [`FilesSearch`] walks a root directory, applies regex include/exclude
//! filters to root-relative paths and skips hidden entries. Results are cached
//! under their [`SearchOptions`]; anything that moves or creates files must call
//! [`FilesSearch::invalidate_cache`] before the next lookup.

mod filter;

pub use filter::RegexFilter;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::pattern::Pattern;

/// Cache key of a discovery call, compared structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchOptions {
    pub root: PathBuf,
    pub include_filters: Vec<Pattern>,
    pub exclude_filters: Vec<Pattern>,
}

#[derive(Debug, Default)]
pub struct FilesSearch {
    cache: HashMap<SearchOptions, Vec<PathBuf>>,
}

impl FilesSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All regular files below `root` passing the filters, in walk order.
    ///
    /// Paths are `root`-joined, or plain relative paths when `root` is `.`.
    /// A cached list is returned without touching the file system.
    ///
    /// # Errors
    /// Returns an error if a filter regex fails to evaluate.
    pub fn all_files(
        &mut self,
        root: &Path,
        include_filters: &[Pattern],
        exclude_filters: &[Pattern],
    ) -> Result<Vec<PathBuf>> {
        let options = SearchOptions {
            root: root.to_path_buf(),
            include_filters: include_filters.to_vec(),
            exclude_filters: exclude_filters.to_vec(),
        };

        if let Some(cached) = self.cache.get(&options) {
            log::debug!(
                "Reusing {} cached file(s) for {}",
                cached.len(),
                root.display()
            );
            return Ok(cached.clone());
        }

        let filter = RegexFilter::new(include_filters, exclude_filters);
        let files = scan(root, &filter)?;
        log::debug!("Discovered {} file(s) in {}", files.len(), root.display());

        self.cache.insert(options, files.clone());
        Ok(files)
    }

    /// Forget every cached discovery result.
    pub fn invalidate_cache(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

fn scan(root: &Path, filter: &RegexFilter<'_>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry below {}: {err}", root.display());
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative_str = relative_path_string(relative);
        let is_dir = entry.file_type().is_dir();

        if filter.is_excluded(&relative_str)? || is_hidden(relative) {
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        if entry.file_type().is_file() && filter.is_included(&relative_str)? {
            files.push(output_path(root, relative, entry.path()));
        }
    }

    Ok(files)
}

/// Hidden when any component starts with a dot.
fn is_hidden(relative: &Path) -> bool {
    relative
        .components()
        .any(|component| component.as_os_str().to_string_lossy().starts_with('.'))
}

/// `/`-separated rendering of a relative path, used for filter matching.
#[must_use]
pub fn relative_path_string(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn output_path(root: &Path, relative: &Path, full: &Path) -> PathBuf {
    if root == Path::new(".") {
        relative.to_path_buf()
    } else {
        full.to_path_buf()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
