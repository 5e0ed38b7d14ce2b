use std::fmt;

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// Number of lines from which a correction is summarized as a line diff.
const LINE_DIFF_THRESHOLD: usize = 3;

/// Text of a matched unit before and after an applied fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoCorrection {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChangeKind {
    Insertion,
    Removal,
}

/// One line of a correction diff. `offset` is 0-based, in the new text for
/// insertions and in the old text for removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    pub kind: LineChangeKind,
    pub offset: usize,
    pub line: String,
}

/// Human-facing description of what a correction changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionSummary {
    Pair { before: String, after: String },
    LineDiff(Vec<LineChange>),
}

impl AutoCorrection {
    #[must_use]
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> CorrectionSummary {
        let line_count = |text: &str| text.split('\n').count();
        if line_count(&self.before) >= LINE_DIFF_THRESHOLD
            || line_count(&self.after) >= LINE_DIFF_THRESHOLD
        {
            CorrectionSummary::LineDiff(self.line_changes())
        } else {
            CorrectionSummary::Pair {
                before: self.before.clone(),
                after: self.after.clone(),
            }
        }
    }

    /// Line diff ordered by offset, insertions before removals at equal offsets.
    #[must_use]
    pub fn line_changes(&self) -> Vec<LineChange> {
        let diff = TextDiff::from_lines(self.before.as_str(), self.after.as_str());
        let mut changes: Vec<LineChange> = diff
            .iter_all_changes()
            .filter_map(|change| {
                let (kind, offset) = match change.tag() {
                    ChangeTag::Insert => (LineChangeKind::Insertion, change.new_index()?),
                    ChangeTag::Delete => (LineChangeKind::Removal, change.old_index()?),
                    ChangeTag::Equal => return None,
                };
                Some(LineChange {
                    kind,
                    offset,
                    line: change.value().trim_end_matches(['\n', '\r']).to_string(),
                })
            })
            .collect();

        changes.sort_by_key(|change| {
            (
                change.offset,
                match change.kind {
                    LineChangeKind::Insertion => 0,
                    LineChangeKind::Removal => 1,
                },
            )
        });
        changes
    }
}

impl fmt::Display for AutoCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.summary() {
            CorrectionSummary::Pair { before, after } => {
                write!(f, "- {before}\n+ {after}")
            }
            CorrectionSummary::LineDiff(changes) => {
                let lines: Vec<String> = changes
                    .iter()
                    .map(|change| {
                        let sign = match change.kind {
                            LineChangeKind::Insertion => '+',
                            LineChangeKind::Removal => '-',
                        };
                        format!("{sign} [L{}] {}", change.offset + 1, change.line)
                    })
                    .collect();
                f.write_str(&lines.join("\n"))
            }
        }
    }
}
