//! Replacement templates.
//!
//! Templates reference captures as `$1`, `${1}` or by name (`$name`,
//! `${name}`); `$$` is a literal dollar sign. Named references are turned into
//! positional ones first, then positional references are expanded per match.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::PatternMatch;

static NAMED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("Invalid regex")
});

static POSITIONAL_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$|\$\{(\d+)\}|\$(\d+)").expect("Invalid regex"));

/// Rewrite every `$name` / `${name}` to `${N}`, where `N` is the 1-based
/// position of `name` among `named_groups`. The braces keep a following digit
/// out of the group number.
///
/// Unbraced references bind to the longest group name that prefixes them, so
/// `$ab` resolves to group `ab` before `a`, and `$a_x` becomes `${1}_x` when only
/// `a` exists. Unknown names are left untouched.
#[must_use]
pub fn numerize_named_references(template: &str, named_groups: &[String]) -> String {
    let position = |name: &str| {
        named_groups
            .iter()
            .position(|group| group == name)
            .map(|index| index + 1)
    };

    NAMED_REFERENCE
        .replace_all(template, |caps: &Captures<'_>| {
            if let Some(name) = caps.get(1) {
                return position(name.as_str())
                    .map_or_else(|| caps[0].to_string(), |n| format!("${{{n}}}"));
            }
            let Some(word) = caps.get(2) else {
                return caps[0].to_string();
            };
            let word = word.as_str();
            named_groups
                .iter()
                .filter(|group| word.starts_with(group.as_str()))
                .max_by_key(|group| group.len())
                .and_then(|group| position(group).map(|n| (n, &word[group.len()..])))
                .map_or_else(|| caps[0].to_string(), |(n, rest)| format!("${{{n}}}{rest}"))
        })
        .into_owned()
}

/// Whether a positional reference of `template` names a group in `1..group_count`.
///
/// Unbraced digit runs count when any prefix of them does, matching how
/// [`expand_positional`] shortens them.
pub(super) fn references_group(template: &str, group_count: usize) -> bool {
    let is_group = |digits: &str| digits.parse::<usize>().is_ok_and(|i| (1..group_count).contains(&i));

    POSITIONAL_REFERENCE.captures_iter(template).any(|caps| {
        if let Some(index) = caps.get(1) {
            return is_group(index.as_str());
        }
        caps.get(2).is_some_and(|digits| {
            let digits = digits.as_str();
            (1..=digits.len()).any(|len| is_group(&digits[..len]))
        })
    })
}

/// Expand positional references of `template` against one match.
///
/// Unbraced digit runs are consumed greedily but shortened until they name an
/// existing group, so `$12` with three groups means group 1 followed by `2`.
/// Groups that did not participate expand to nothing.
pub(super) fn expand_positional(found: &PatternMatch, template: &str) -> String {
    let group_text = |index: usize| found.group(index).map_or("", |c| c.text.as_str());

    POSITIONAL_REFERENCE
        .replace_all(template, |caps: &Captures<'_>| {
            if let Some(index) = caps.get(1) {
                return index
                    .as_str()
                    .parse::<usize>()
                    .map_or_else(|_| String::new(), |i| group_text(i).to_string());
            }
            let Some(digits) = caps.get(2) else {
                return "$".to_string();
            };
            let digits = digits.as_str();
            let split = (1..=digits.len())
                .rev()
                .find(|&len| {
                    digits[..len]
                        .parse::<usize>()
                        .is_ok_and(|i| i < found.group_count())
                })
                .unwrap_or(digits.len());
            let index = digits[..split].parse::<usize>().unwrap_or(usize::MAX);
            format!("{}{}", group_text(index), &digits[split..])
        })
        .into_owned()
}
