//! Regex layer shared by every checker.
//!
//! A [`Pattern`] wraps a `fancy_regex::Regex` together with the order of its
//! named capture groups and the options it was compiled with. Rule authors can
//! refer to groups by name in replacement templates; those references are
//! rewritten to positional ones before expansion (see [`template`]).

mod template;

pub use template::numerize_named_references;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use fancy_regex::Regex;

use crate::error::{AnyLintError, Result};

/// Reserved field name selecting options in a named-field pattern.
pub const OPTIONS_FIELD: &str = "_";

/// Flags applied on top of the always-on line-anchored (`(?m)`) mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PatternOptions {
    pub case_insensitive: bool,
    pub dot_matches_newline: bool,
}

impl PatternOptions {
    /// Parse a flag string such as `"i"`, `"m"`, `"mi"` or `"im"`.
    ///
    /// Returns `None` if the string contains anything but `i` and `m`.
    #[must_use]
    pub fn from_flags(flags: &str) -> Option<Self> {
        let mut options = Self::default();
        for flag in flags.trim().chars() {
            match flag {
                'i' => options.case_insensitive = true,
                'm' => options.dot_matches_newline = true,
                _ => return None,
            }
        }
        Some(options)
    }

    fn inline_flags(self) -> String {
        let mut flags = String::from("m");
        if self.case_insensitive {
            flags.push('i');
        }
        if self.dot_matches_newline {
            flags.push('s');
        }
        format!("(?{flags})")
    }
}

/// Strip a trailing `\i`, `\m`, `\mi` or `\im` from a pattern string.
#[must_use]
pub fn parse_option_suffix(source: &str) -> (String, PatternOptions) {
    for suffix in [r"\mi", r"\im", r"\i", r"\m"] {
        if let Some(stripped) = source.strip_suffix(suffix)
            && let Some(options) = PatternOptions::from_flags(&suffix[1..])
        {
            return (stripped.to_string(), options);
        }
    }
    (source.to_string(), PatternOptions::default())
}

/// A single captured span within the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub range: Range<usize>,
    pub text: String,
}

/// One match of a [`Pattern`], detached from the text it was found in.
///
/// Index 0 is the full match; groups that did not participate are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    full: Capture,
    captures: Vec<Option<Capture>>,
}

impl PatternMatch {
    const fn full(&self) -> &Capture {
        &self.full
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.full().range.clone()
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.full().range.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.full().range.end
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full().text
    }

    /// Capture group by index (0 = full match).
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&Capture> {
        self.captures.get(index).and_then(Option::as_ref)
    }

    /// Number of groups including the full match.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.captures.len()
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    options: PatternOptions,
    regex: Regex,
    named_groups: Vec<String>,
}

impl Pattern {
    /// Compile a pattern string, honoring a trailing option suffix.
    ///
    /// # Errors
    /// Returns `InvalidRegex` if the pattern does not compile.
    pub fn from_source(source: &str) -> Result<Self> {
        let (stripped, options) = parse_option_suffix(source);
        Self::with_options(&stripped, options)
    }

    /// Compile a pattern string with explicit options.
    ///
    /// # Errors
    /// Returns `InvalidRegex` if the pattern does not compile.
    pub fn with_options(source: &str, options: PatternOptions) -> Result<Self> {
        let regex = compile(source, options)?;
        let named_groups = regex.capture_names().flatten().map(String::from).collect();
        Ok(Self {
            source: source.to_string(),
            options,
            regex,
            named_groups,
        })
    }

    /// Build a pattern from ordered `(name, subpattern)` fields.
    ///
    /// Each field becomes `(?<name>subpattern)`; the [`OPTIONS_FIELD`] entry,
    /// if present, selects options instead of adding a group.
    ///
    /// # Errors
    /// Returns `Config` for an unknown option selector and `InvalidRegex` if the
    /// concatenated pattern does not compile.
    pub fn from_named_fields<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut source = String::new();
        let mut named_groups = Vec::new();
        let mut options = PatternOptions::default();

        for (name, subpattern) in fields {
            if name == OPTIONS_FIELD {
                options = PatternOptions::from_flags(subpattern).ok_or_else(|| {
                    AnyLintError::Config(format!(
                        "unknown regex options '{subpattern}', expected a combination of 'i' and 'm'"
                    ))
                })?;
                continue;
            }
            source.push_str(&format!("(?<{name}>{subpattern})"));
            named_groups.push(name.to_string());
        }

        let regex = compile(&source, options)?;
        Ok(Self {
            source,
            options,
            regex,
            named_groups,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn options(&self) -> PatternOptions {
        self.options
    }

    /// Named capture groups in declaration order.
    #[must_use]
    pub fn named_groups(&self) -> &[String] {
        &self.named_groups
    }

    /// Absolute group index of a named group.
    #[must_use]
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.regex
            .capture_names()
            .position(|group| group == Some(name))
    }

    /// # Errors
    /// Returns `RegexRuntime` if evaluation fails (e.g. backtrack limit).
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.regex.is_match(text)?)
    }

    /// All non-overlapping matches in ascending offset order.
    ///
    /// # Errors
    /// Returns `RegexRuntime` if evaluation fails.
    pub fn find_all(&self, text: &str) -> Result<Vec<PatternMatch>> {
        let mut matches = Vec::new();
        for captures in self.regex.captures_iter(text) {
            let captures = captures?;
            let groups = (0..captures.len())
                .map(|index| {
                    captures.get(index).map(|m| Capture {
                        range: m.range(),
                        text: m.as_str().to_string(),
                    })
                })
                .collect::<Vec<_>>();
            if let Some(Some(full)) = groups.first().cloned() {
                matches.push(PatternMatch {
                    full,
                    captures: groups,
                });
            }
        }
        Ok(matches)
    }

    /// Rewrite `$name` references in `template` to positional `$N` ones.
    #[must_use]
    pub fn numerize_named_references(&self, template: &str) -> String {
        numerize_named_references(template, &self.named_groups)
    }

    /// Whether `template` references at least one capture group of this pattern
    /// (`$1`, `${2}`, `$name`). `$0` and references past the last group do not
    /// count.
    #[must_use]
    pub fn references_capture_groups(&self, template: &str) -> bool {
        template::references_group(
            &self.numerize_named_references(template),
            self.regex.captures_len(),
        )
    }

    /// Substitute one match's captures into `template`.
    #[must_use]
    pub fn expand(&self, found: &PatternMatch, template: &str) -> String {
        template::expand_positional(found, &self.numerize_named_references(template))
    }

    /// Replace every match in `text` with the expanded `template`.
    ///
    /// # Errors
    /// Returns `RegexRuntime` if evaluation fails.
    pub fn replace_all_captures(&self, text: &str, template: &str) -> Result<String> {
        let numerized = self.numerize_named_references(template);
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for found in self.find_all(text)? {
            output.push_str(&text[last..found.start()]);
            output.push_str(&template::expand_positional(&found, &numerized));
            last = found.end();
        }
        output.push_str(&text[last..]);
        Ok(output)
    }
}

fn compile(source: &str, options: PatternOptions) -> Result<Regex> {
    let full = format!("{}{source}", options.inline_flags());
    Regex::new(&full).map_err(|e| AnyLintError::InvalidRegex {
        pattern: source.to_string(),
        source: Box::new(e),
    })
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.options == other.options
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.options.hash(state);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
