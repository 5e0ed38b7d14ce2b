use serde::{Deserialize, Serialize};

use crate::pattern::{Pattern, PatternMatch};

/// Capture group reference by absolute index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupRef {
    Index(usize),
    Name(String),
}

impl GroupRef {
    fn resolve(&self, pattern: &Pattern) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(name) => pattern.group_index(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationRange {
    #[default]
    FullMatch,
    CaptureGroup(GroupRef),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationBound {
    #[default]
    Lower,
    Upper,
}

/// Which offset of a match is reported as the violation's position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationLocation {
    #[serde(default)]
    pub range: LocationRange,
    #[serde(default)]
    pub bound: LocationBound,
}

impl ViolationLocation {
    /// Byte offset selected by this policy. Falls back to the full match when
    /// the chosen group does not exist or did not participate.
    #[must_use]
    pub fn offset(&self, pattern: &Pattern, found: &PatternMatch) -> usize {
        let range = match &self.range {
            LocationRange::FullMatch => None,
            LocationRange::CaptureGroup(group) => group
                .resolve(pattern)
                .and_then(|index| found.group(index))
                .map(|capture| capture.range.clone()),
        }
        .unwrap_or_else(|| found.range());

        match self.bound {
            LocationBound::Lower => range.start,
            LocationBound::Upper => range.end,
        }
    }
}

/// Newline offsets of a text, for turning byte offsets into rows and columns.
pub struct LineIndex<'a> {
    text: &'a str,
    newlines: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let newlines = text.match_indices('\n').map(|(offset, _)| offset).collect();
        Self { text, newlines }
    }

    /// 1-based `(row, column)`; the column counts characters, not bytes.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let preceding = self.newlines.partition_point(|&newline| newline < offset);
        let line_start = if preceding == 0 {
            0
        } else {
            self.newlines[preceding - 1] + 1
        };
        let column = self.text[line_start..offset].chars().count() + 1;
        (preceding + 1, column)
    }
}

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;
