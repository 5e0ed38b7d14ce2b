use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnyLintError, Result};

/// How serious a violation is. Ordered `Info < Warning < Error`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AnyLintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(AnyLintError::CheckEncoding(format!(
                "unknown severity '{other}', expected info, warning or error"
            ))),
        }
    }
}

/// Identity of a rule.
///
/// Two checks are the same check when their ids are equal; hint and severity
/// are carried along but do not take part in comparisons. The serialized form
/// is the compact `"<id>@<severity>: <hint>"` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Check {
    pub id: String,
    pub hint: String,
    pub severity: Severity,
}

impl Check {
    #[must_use]
    pub fn new(id: impl Into<String>, hint: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: id.into(),
            hint: hint.into(),
            severity,
        }
    }

    /// `"<id>@<severity>: <hint>"`.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}@{}: {}", self.id, self.severity, self.hint)
    }

    /// Parse the compact encoding. A missing `@<severity>` means `error`.
    ///
    /// # Errors
    /// Returns `CheckEncoding` if there is no `:` separator, the id is empty,
    /// or the severity is unknown.
    pub fn decode(encoded: &str) -> Result<Self> {
        let (head, hint) = encoded
            .split_once(": ")
            .or_else(|| encoded.strip_suffix(':').map(|head| (head, "")))
            .ok_or_else(|| {
                AnyLintError::CheckEncoding(format!(
                    "'{encoded}' is not of the form '<id>@<severity>: <hint>'"
                ))
            })?;

        let (id, severity) = match head.rsplit_once('@') {
            Some((id, severity)) => (id, severity.parse()?),
            None => (head, Severity::Error),
        };

        if id.trim().is_empty() {
            return Err(AnyLintError::CheckEncoding(format!(
                "'{encoded}' has an empty check id"
            )));
        }

        Ok(Self::new(id.trim(), hint, severity))
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Check {
    type Err = AnyLintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<String> for Check {
    type Error = AnyLintError;

    fn try_from(value: String) -> Result<Self> {
        Self::decode(&value)
    }
}

impl From<Check> for String {
    fn from(check: Check) -> Self {
        check.encode()
    }
}

impl PartialEq for Check {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Check {}

impl Hash for Check {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Check {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Check {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
