use crate::error::Result;
use crate::model::LintResults;

use super::OutputFormatter;

/// Pretty-printed [`LintResults`], in the shape custom scripts may print back.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, results: &LintResults) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
