mod custom_script;
mod directives;
mod file_contents;
mod file_paths;
mod location;

pub use custom_script::{CustomScriptChecker, ScriptOutput};
pub use directives::{SkipHereRows, skips_file};
pub use file_contents::{FileContentsChecker, MAX_AUTOCORRECT_PASSES};
pub use file_paths::{FilePathsChecker, FilePathsMode};
pub use location::{GroupRef, LineIndex, LocationBound, LocationRange, ViolationLocation};

use crate::error::Result;
use crate::model::{Check, LintResults, Violation};

pub trait Checker {
    /// The check whose violations this checker reports.
    fn check(&self) -> &Check;

    /// Execute the check and return its violations in discovery order.
    ///
    /// # Errors
    /// Returns an error when a pattern fails to evaluate, a corrected file
    /// cannot be written, or a script cannot be run.
    fn perform_check(&mut self) -> Result<Vec<Violation>>;

    /// Execute the check and file the violations under [`Checker::check`].
    ///
    /// # Errors
    /// Propagates errors of [`Checker::perform_check`].
    fn run(&mut self) -> Result<LintResults> {
        let violations = self.perform_check()?;
        let mut results = LintResults::new();
        results.append(violations, self.check());
        Ok(results)
    }
}
