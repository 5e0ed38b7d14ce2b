mod loader;
mod model;
mod validation;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, RealFileSystem};
pub use model::{
    AutoCorrectExample, Config, CustomScriptRule, DEFAULT_CONFIG_NAME, FileContentsRule,
    FilePathsRule, RegexConfig, compile_filters,
};
pub use validation::{validate_autocorrect_examples, validate_examples, validate_rule_ids};
