use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::checker::ViolationLocation;
use crate::error::Result;
use crate::model::{Check, Severity};
use crate::pattern::Pattern;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "anylint.toml";

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Root of an `anylint.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory scanned by file rules and used as the scripts' working directory.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub file_contents: Vec<FileContentsRule>,

    #[serde(default)]
    pub file_paths: Vec<FilePathsRule>,

    #[serde(default)]
    pub custom_scripts: Vec<CustomScriptRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            file_contents: Vec::new(),
            file_paths: Vec::new(),
            custom_scripts: Vec::new(),
        }
    }
}

impl Config {
    /// Ids of all rules in declaration order.
    #[must_use]
    pub fn rule_ids(&self) -> Vec<&str> {
        self.file_contents
            .iter()
            .map(|rule| rule.id.as_str())
            .chain(self.file_paths.iter().map(|rule| rule.id.as_str()))
            .chain(self.custom_scripts.iter().map(|rule| rule.id.as_str()))
            .collect()
    }
}

/// A rule's regex: a plain source (with optional `\i`/`\m` suffix) or an
/// ordered table of named sub-patterns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RegexConfig {
    Source(String),
    NamedFields(IndexMap<String, String>),
}

impl RegexConfig {
    /// # Errors
    /// Returns an error if the regex does not compile.
    pub fn compile(&self) -> Result<Pattern> {
        match self {
            Self::Source(source) => Pattern::from_source(source),
            Self::NamedFields(fields) => {
                Pattern::from_named_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoCorrectExample {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileContentsRule {
    pub id: String,
    /// Expanded per match into the violation message when it references a
    /// capture group (`$1`, `$name`); `$$` then stands for a literal `$`.
    pub hint: String,
    #[serde(default)]
    pub severity: Severity,
    pub regex: RegexConfig,
    #[serde(default)]
    pub matching_examples: Vec<String>,
    #[serde(default)]
    pub non_matching_examples: Vec<String>,
    #[serde(default)]
    pub include_filters: Vec<String>,
    #[serde(default)]
    pub exclude_filters: Vec<String>,
    #[serde(default)]
    pub autocorrect_replacement: Option<String>,
    #[serde(default)]
    pub autocorrect_examples: Vec<AutoCorrectExample>,
    #[serde(default)]
    pub repeat_if_autocorrected: bool,
    #[serde(default)]
    pub violation_location: ViolationLocation,
}

impl FileContentsRule {
    #[must_use]
    pub fn check(&self) -> Check {
        Check::new(&self.id, &self.hint, self.severity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilePathsRule {
    pub id: String,
    pub hint: String,
    #[serde(default)]
    pub severity: Severity,
    pub regex: RegexConfig,
    #[serde(default)]
    pub matching_examples: Vec<String>,
    #[serde(default)]
    pub non_matching_examples: Vec<String>,
    #[serde(default)]
    pub include_filters: Vec<String>,
    #[serde(default)]
    pub exclude_filters: Vec<String>,
    #[serde(default)]
    pub autocorrect_replacement: Option<String>,
    #[serde(default)]
    pub autocorrect_examples: Vec<AutoCorrectExample>,
    #[serde(default)]
    pub violate_if_no_matches_found: bool,
}

impl FilePathsRule {
    #[must_use]
    pub fn check(&self) -> Check {
        Check::new(&self.id, &self.hint, self.severity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomScriptRule {
    pub id: String,
    pub hint: String,
    #[serde(default)]
    pub severity: Severity,
    pub command: String,
    /// Kill the script after this many seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CustomScriptRule {
    #[must_use]
    pub fn check(&self) -> Check {
        Check::new(&self.id, &self.hint, self.severity)
    }
}

/// Compile filter sources into patterns.
///
/// # Errors
/// Returns an error if any filter does not compile.
pub fn compile_filters(sources: &[String]) -> Result<Vec<Pattern>> {
    sources
        .iter()
        .map(|source| Pattern::from_source(source))
        .collect()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
