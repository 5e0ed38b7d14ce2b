use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnyLintError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid regex: {pattern}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("Regex evaluation failed: {0}")]
    RegexRuntime(#[source] Box<fancy_regex::Error>),

    #[error("Check '{check_id}' failed example validation: {message}")]
    ExampleMismatch { check_id: String, message: String },

    #[error("Check '{check_id}' has incompatible options: {message}")]
    IncompatibleOptions { check_id: String, message: String },

    #[error("Invalid check encoding: {0}")]
    CheckEncoding(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch command: {command}")]
    CommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command timed out after {secs}s: {command}")]
    CommandTimeout { command: String, secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnyLintError {
    /// Short category name used as the headline of error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::InvalidRegex { .. } | Self::RegexRuntime(_) => "Regex",
            Self::ExampleMismatch { .. } | Self::IncompatibleOptions { .. } => "Rule",
            Self::CheckEncoding(_) | Self::Json(_) => "Format",
            Self::FileRead { .. } | Self::FileWrite { .. } | Self::Io(_) => "IO",
            Self::CommandLaunch { .. } | Self::CommandTimeout { .. } => "Command",
        }
    }

    /// Actionable hint for the user, when one applies.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some("Check the rule declarations in your anylint.toml"),
            Self::TomlParse(_) => Some("Check the TOML syntax of your configuration file"),
            Self::InvalidRegex { .. } => Some("Check the regex syntax of the rule's pattern"),
            Self::ExampleMismatch { .. } => {
                Some("Fix the pattern or the examples so they agree with each other")
            }
            Self::IncompatibleOptions { .. } => {
                Some("Remove one of the conflicting options from the rule")
            }
            Self::FileRead { source, .. }
            | Self::FileWrite { source, .. }
            | Self::CommandLaunch { source, .. }
            | Self::Io(source) => match source.kind() {
                std::io::ErrorKind::NotFound => Some("Check that the file path exists"),
                std::io::ErrorKind::PermissionDenied => Some("Check file permissions"),
                _ => None,
            },
            Self::CommandTimeout { .. } => Some("Increase timeout_secs or speed up the script"),
            Self::RegexRuntime(_) | Self::CheckEncoding(_) | Self::Json(_) => None,
        }
    }
}

impl From<fancy_regex::Error> for AnyLintError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::RegexRuntime(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, AnyLintError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
