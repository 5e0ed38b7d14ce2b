use std::fmt::Write;
use std::io::Write as IoWrite;

use crate::error::Result;
use crate::model::{Check, LintResults, Severity, Violation};

use super::{OutputFormatter, ansi};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

const SEVERITIES_DESCENDING: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
        }
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
            Severity::Info => ansi::CYAN,
        }
    }

    fn colorize_with_color(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_check(&self, check: &Check, violations: &[Violation], output: &mut Vec<u8>) {
        let label = check.severity.as_str().to_uppercase();
        let colored = self.colorize_with_color(&label, Self::severity_color(check.severity));
        writeln!(
            output,
            "{} {colored} [{}] {} ({} violation{})",
            Self::status_icon(check.severity),
            check.id,
            check.hint,
            violations.len(),
            if violations.len() == 1 { "" } else { "s" }
        )
        .ok();

        for violation in violations {
            Self::format_violation(violation, output);
        }
    }

    fn format_violation(violation: &Violation, output: &mut Vec<u8>) {
        let location = violation
            .location
            .as_ref()
            .map_or_else(|| "(no location)".to_string(), ToString::to_string);
        match &violation.matched_string {
            Some(matched) if violation.location.is_some() => {
                writeln!(output, "   {location}: {}", first_line(matched)).ok();
            }
            _ => {
                writeln!(output, "   {location}").ok();
            }
        }

        if let Some(message) = &violation.message {
            writeln!(output, "     {message}").ok();
        }
        if let Some(correction) = &violation.applied_auto_correction {
            writeln!(output, "     Autocorrected:").ok();
            for line in correction.to_string().lines() {
                writeln!(output, "       {line}").ok();
            }
        }
    }

    fn format_summary(&self, results: &LintResults) -> String {
        let checks = results.all_executed_checks().len();
        let mut summary = format!("Summary: {checks} checks executed");

        for severity in SEVERITIES_DESCENDING {
            let count = results.violations_count_with_severity(severity);
            let counted = self.colorize_with_color(&count.to_string(), Self::severity_color(severity));
            let _ = write!(summary, ", {counted} {}", plural(severity.as_str(), count));
        }

        let corrected = results
            .all_found_violations()
            .iter()
            .filter(|violation| violation.applied_auto_correction.is_some())
            .count();
        if corrected > 0 {
            let corrected_str = self.colorize_with_color(&corrected.to_string(), ansi::GREEN);
            let _ = write!(summary, " ({corrected_str} autocorrected)");
        }

        summary
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn plural(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, results: &LintResults) -> Result<String> {
        let mut output = Vec::new();

        for severity in SEVERITIES_DESCENDING {
            for (check, violations) in results.checks_with_severity(severity) {
                if violations.is_empty() {
                    continue;
                }
                self.format_check(check, violations, &mut output);
                writeln!(output).ok();
            }
        }

        // Show passing checks only in verbose mode
        if self.verbose >= 1 {
            for check in results.all_executed_checks() {
                if results.violations_for(check).is_empty() {
                    let passed = self.colorize_with_color("PASSED", ansi::GREEN);
                    writeln!(output, "✓ {passed} [{}]", check.id).ok();
                }
            }
        }

        writeln!(output, "{}", self.format_summary(results)).ok();
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
