//! Shell commands whose output is interpreted as lint results.
//!
//! Output is interpreted in this order:
//! 1. an embedded severity-keyed JSON object, taken as a whole results fragment
//! 2. an embedded JSON array of violations, filed under the invoking check
//! 3. a zero exit status, meaning the check passed
//! 4. otherwise one violation carrying the last non-empty output line

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use super::Checker;
use crate::error::{AnyLintError, Result};
use crate::model::{Check, LintResults, Violation};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of a finished script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

pub struct CustomScriptChecker {
    check: Check,
    command: String,
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl CustomScriptChecker {
    #[must_use]
    pub fn new(check: Check, command: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            check,
            command: command.into(),
            working_dir: working_dir.into(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the command through `sh -c` and capture both streams.
    ///
    /// # Errors
    /// Returns [`AnyLintError::CommandLaunch`] when the shell cannot be started
    /// or reports the command as not found (127) or not executable (126), and
    /// [`AnyLintError::CommandTimeout`] when the timeout expires.
    pub fn execute(&self) -> Result<ScriptOutput> {
        let launch_error = |source| AnyLintError::CommandLaunch {
            command: self.command.clone(),
            source,
        };

        log::info!("Running custom script for {}: {}", self.check.id, self.command);
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(launch_error)?;

        let stdout = child.stdout.take().map(read_to_end_in_background);
        let stderr = child.stderr.take().map(read_to_end_in_background);

        let status = match self.timeout {
            Some(timeout) => self.wait_with_timeout(&mut child, timeout)?,
            None => child.wait().map_err(launch_error)?,
        };

        let output = ScriptOutput {
            stdout: join_reader(stdout),
            stderr: join_reader(stderr),
            success: status.success(),
        };
        if let Some(kind) = status.code().and_then(shell_launch_failure) {
            let detail = last_non_empty_line(&output).unwrap_or_else(|| kind.to_string());
            return Err(launch_error(std::io::Error::new(kind, detail)));
        }
        Ok(output)
    }

    fn wait_with_timeout(
        &self,
        child: &mut Child,
        timeout: Duration,
    ) -> Result<std::process::ExitStatus> {
        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if start.elapsed() >= timeout {
                // The child may have exited between the poll and the kill.
                let _ = child.kill();
                let _ = child.wait();
                return Err(AnyLintError::CommandTimeout {
                    command: self.command.clone(),
                    secs: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Turn captured output into results for this check.
    #[must_use]
    pub fn interpret(&self, output: &ScriptOutput) -> LintResults {
        if let Some(fragment) = find_embedded::<LintResults>(&output.stdout, '{', |r| !r.is_empty())
        {
            return fragment;
        }

        let mut results = LintResults::new();
        if let Some(violations) = find_embedded::<Vec<Violation>>(&output.stdout, '[', |_| true) {
            results.append(violations, &self.check);
        } else if output.success {
            results.append(Vec::new(), &self.check);
        } else {
            let violation = match last_non_empty_line(output) {
                Some(line) => Violation::new().with_message(line),
                None => Violation::new(),
            };
            results.append(vec![violation], &self.check);
        }
        results
    }
}

impl Checker for CustomScriptChecker {
    fn check(&self) -> &Check {
        &self.check
    }

    fn perform_check(&mut self) -> Result<Vec<Violation>> {
        let results = self.run()?;
        Ok(results
            .violations_for(&self.check)
            .into_iter()
            .cloned()
            .collect())
    }

    fn run(&mut self) -> Result<LintResults> {
        let output = self.execute()?;
        Ok(self.interpret(&output))
    }
}

fn read_to_end_in_background<R: Read + Send + 'static>(
    mut stream: R,
) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        if let Err(e) = stream.read_to_end(&mut bytes) {
            log::warn!("Failed to read script output: {e}");
        }
        String::from_utf8_lossy(&bytes).into_owned()
    })
}

/// `sh` exit statuses that mean the command itself never ran.
fn shell_launch_failure(code: i32) -> Option<std::io::ErrorKind> {
    match code {
        126 => Some(std::io::ErrorKind::PermissionDenied),
        127 => Some(std::io::ErrorKind::NotFound),
        _ => None,
    }
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

/// First JSON value of type `T` starting at an `open` character that passes
/// `accept`. Text around the value is ignored.
fn find_embedded<T: DeserializeOwned>(
    text: &str,
    open: char,
    accept: impl Fn(&T) -> bool,
) -> Option<T> {
    text.match_indices(open).find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<T>()
            .next()
            .and_then(std::result::Result::ok)
            .filter(&accept)
    })
}

fn last_non_empty_line(output: &ScriptOutput) -> Option<String> {
    output
        .stdout
        .lines()
        .chain(output.stderr.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .map(str::to_string)
}

#[cfg(test)]
#[path = "custom_script_tests.rs"]
mod tests;
