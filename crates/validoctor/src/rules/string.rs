//! String rules
//!
//! Lengths are counted in characters, not bytes.

use regex::Regex;

use crate::foundation::{ConfigError, Rule};
use crate::rules::{names, string_rule};

/// Requires a string with at least one non-whitespace character.
#[must_use]
pub fn not_blank() -> Rule {
    string_rule(names::STRING_EMPTY, |s| !s.trim().is_empty())
}

/// Requires at least `min` characters.
#[must_use]
pub fn min_length(min: usize) -> Rule {
    string_rule(names::STRING_TOO_SHORT, move |s| s.chars().count() >= min).with_param("min", min)
}

/// Requires at most `max` characters.
#[must_use]
pub fn max_length(max: usize) -> Rule {
    string_rule(names::STRING_TOO_LONG, move |s| s.chars().count() <= max).with_param("max", max)
}

/// Requires the string to match `pattern` somewhere.
///
/// Anchor the pattern (`^...$`) to match the whole string.
///
/// # Errors
///
/// [`ConfigError::Pattern`] if `pattern` does not compile.
pub fn matches(pattern: &str) -> Result<Rule, ConfigError> {
    let regex = Regex::new(pattern)?;
    Ok(
        string_rule(names::STRING_PATTERN_MISMATCH, move |s| regex.is_match(s))
            .with_param("pattern", pattern),
    )
}
