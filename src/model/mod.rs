//! Data model shared by checkers and output: checks, violations, results.

mod autocorrection;
mod check;
mod results;
mod violation;

pub use autocorrection::{AutoCorrection, CorrectionSummary, LineChange, LineChangeKind};
pub use check::{Check, Severity};
pub use results::LintResults;
pub use violation::{Location, Violation};

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
