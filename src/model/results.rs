use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Check, Severity, Violation};

/// Violations of a lint run, grouped by severity, then by check.
///
/// Serializes as `{"<severity>": {"<id>@<severity>: <hint>": [violation, ...]}}`,
/// the same shape custom scripts may print.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintResults {
    buckets: BTreeMap<Severity, BTreeMap<Check, Vec<Violation>>>,
}

impl LintResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `violations` for `check` under the check's own severity.
    ///
    /// An empty list still marks the check as executed.
    pub fn append(&mut self, violations: Vec<Violation>, check: &Check) {
        self.buckets
            .entry(check.severity)
            .or_default()
            .entry(check.clone())
            .or_default()
            .extend(violations);
    }

    /// Fold `other` into `self`; violations of a shared check are concatenated.
    pub fn merge(&mut self, other: Self) {
        for (severity, checks) in other.buckets {
            let bucket = self.buckets.entry(severity).or_default();
            for (check, violations) in checks {
                bucket.entry(check).or_default().extend(violations);
            }
        }
    }

    /// Every executed check, sorted by id, each id once.
    #[must_use]
    pub fn all_executed_checks(&self) -> Vec<&Check> {
        let mut checks: Vec<&Check> = self.buckets.values().flat_map(BTreeMap::keys).collect();
        checks.sort();
        checks.dedup();
        checks
    }

    /// Every violation in discovery order.
    #[must_use]
    pub fn all_found_violations(&self) -> Vec<&Violation> {
        let mut violations: Vec<&Violation> = self
            .buckets
            .values()
            .flat_map(BTreeMap::values)
            .flatten()
            .collect();
        violations.sort_by_key(|violation| violation.discover_date);
        violations
    }

    /// Checks of one severity with their violations.
    #[must_use]
    pub fn checks_with_severity(&self, severity: Severity) -> Vec<(&Check, &[Violation])> {
        self.buckets
            .get(&severity)
            .map(|checks| {
                checks
                    .iter()
                    .map(|(check, violations)| (check, violations.as_slice()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Violations recorded for `check` across all severities.
    #[must_use]
    pub fn violations_for(&self, check: &Check) -> Vec<&Violation> {
        self.buckets
            .values()
            .filter_map(|checks| checks.get(check))
            .flatten()
            .collect()
    }

    /// Highest severity that has at least one violation.
    #[must_use]
    pub fn max_violation_severity(&self) -> Option<Severity> {
        self.buckets
            .iter()
            .rev()
            .find(|(_, checks)| checks.values().any(|violations| !violations.is_empty()))
            .map(|(severity, _)| *severity)
    }

    #[must_use]
    pub fn violations_count(&self) -> usize {
        self.buckets
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    #[must_use]
    pub fn violations_count_with_severity(&self, severity: Severity) -> usize {
        self.buckets
            .get(&severity)
            .map_or(0, |checks| checks.values().map(Vec::len).sum())
    }

    /// True when no check was recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(BTreeMap::is_empty)
    }
}
