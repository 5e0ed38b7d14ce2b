use crate::error::Result;
use crate::pattern::Pattern;

/// Include/exclude regexes applied to root-relative paths (`/`-separated).
///
/// Exclusion always wins; an empty include list includes everything.
#[derive(Debug, Clone, Copy)]
pub struct RegexFilter<'a> {
    include: &'a [Pattern],
    exclude: &'a [Pattern],
}

impl<'a> RegexFilter<'a> {
    #[must_use]
    pub const fn new(include: &'a [Pattern], exclude: &'a [Pattern]) -> Self {
        Self { include, exclude }
    }

    /// # Errors
    /// Returns an error if a filter regex fails to evaluate.
    pub fn is_excluded(&self, relative_path: &str) -> Result<bool> {
        for pattern in self.exclude {
            if pattern.is_match(relative_path)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// # Errors
    /// Returns an error if a filter regex fails to evaluate.
    pub fn is_included(&self, relative_path: &str) -> Result<bool> {
        if self.include.is_empty() {
            return Ok(true);
        }
        for pattern in self.include {
            if pattern.is_match(relative_path)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
