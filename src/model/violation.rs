use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AutoCorrection;

/// Where a violation was found. `row == None` means the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Location {
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            row: None,
            column: None,
        }
    }

    #[must_use]
    pub fn position(path: impl Into<PathBuf>, row: usize, column: usize) -> Self {
        Self {
            file_path: Some(path.into()),
            row: Some(row),
            column: Some(column),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.file_path {
            write!(f, "{}", path.display())?;
        }
        if let Some(row) = self.row {
            write!(f, ":{row}")?;
            if let Some(column) = self.column {
                write!(f, ":{column}")?;
            }
        }
        Ok(())
    }
}

/// A single reported instance of a failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(default = "Utc::now")]
    pub discover_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_auto_correction: Option<AutoCorrection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Default for Violation {
    fn default() -> Self {
        Self::new()
    }
}

impl Violation {
    /// A positionless violation discovered now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            discover_date: Utc::now(),
            matched_string: None,
            location: None,
            applied_auto_correction: None,
            message: None,
        }
    }

    #[must_use]
    pub fn with_matched_string(mut self, matched: impl Into<String>) -> Self {
        self.matched_string = Some(matched.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_auto_correction(mut self, correction: Option<AutoCorrection>) -> Self {
        self.applied_auto_correction = correction;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
