#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the anylint binary.
#[macro_export]
macro_rules! anylint {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("anylint"))
    };
}

/// Temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        self.dir.path().join(relative_path).exists()
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `anylint.toml` into the temp directory.
    pub fn create_config(&self, content: &str) {
        self.create_file("anylint.toml", content);
    }
}

/// A warning-level rule that puts spaces around `=` in Swift files.
pub const WHITESPACE_RULE: &str = r#"
[[file_contents]]
id = "Whitespace"
hint = "Use spaces around '='."
severity = "warning"
regex = '(let|var) (\w+)=(\w+)'
matching_examples = ["let x=5"]
non_matching_examples = ["let x = 5"]
include_filters = ['\.swift$']
autocorrect_replacement = "$1 $2 = $3"
autocorrect_examples = [{ before = "let x=5", after = "let x = 5" }]
"#;

/// An error-level rule requiring a README.md.
pub const README_RULE: &str = r#"
[[file_paths]]
id = "Readme"
hint = "Every project needs a README.md."
regex = '(^|/)README\.md$'
violate_if_no_matches_found = true
"#;
