use std::fs;
use std::path::Path;

use crate::cli::{Cli, LintArgs};
use crate::config::{ConfigLoader, FileConfigLoader};
use crate::lint::Linter;
use crate::model::{LintResults, Severity};
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, print_error,
};
use crate::{AnyLintError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS_FOUND, Result};

#[must_use]
pub fn run_lint(args: &LintArgs, cli: &Cli) -> i32 {
    match run_lint_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

pub(crate) fn run_lint_impl(args: &LintArgs, cli: &Cli) -> Result<i32> {
    // 1. Load configuration
    let loader = FileConfigLoader::new();
    let config = match &args.config {
        Some(path) => loader.load_from_path(path)?,
        None => loader.load()?,
    };

    // 2. Compile and validate every rule before touching any file
    let mut linter = Linter::new(&config)?;
    if args.validate_only {
        if !cli.quiet {
            println!("Configuration is valid: {} rule(s)", linter.checks().len());
        }
        return Ok(EXIT_SUCCESS);
    }

    // 3. Run checks
    let results = linter.run()?;

    // 4. Format and write output
    let output = format_output(args.format, &results, cli.color.into(), cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(exit_code(&results, args.strict))
}

pub(crate) fn format_output(
    format: OutputFormat,
    results: &LintResults,
    color_mode: ColorMode,
    verbose: u8,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(results),
        OutputFormat::Json => JsonFormatter.format(results),
    }
}

pub(crate) fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content).map_err(|source| AnyLintError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

/// Error-severity violations fail the run; warnings only with `strict`.
#[must_use]
pub fn exit_code(results: &LintResults, strict: bool) -> i32 {
    match results.max_violation_severity() {
        Some(Severity::Error) => EXIT_VIOLATIONS_FOUND,
        Some(Severity::Warning) if strict => EXIT_VIOLATIONS_FOUND,
        _ => EXIT_SUCCESS,
    }
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
