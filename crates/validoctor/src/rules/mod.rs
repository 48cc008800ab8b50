//! Predefined rules
//!
//! A small catalog so the crate is usable out of the box. Every function
//! returns a plain [`Rule`]; nothing here is special to the engine and any
//! rule can be replaced by one built with [`Rule::new`] or [`Rule::typed`].
//!
//! # Categories
//!
//! - **Nullity**: [`not_null`], [`null`]
//! - **String**: [`not_blank`], [`min_length`], [`max_length`], [`matches`]
//! - **Numeric**: [`in_range`], [`at_least`], [`at_most`]
//! - **Collection**: [`not_empty`], [`max_size`]
//! - **Choice**: [`one_of`]
//!
//! String, numeric and collection rules report a null value as a violation
//! (chain [`Rule::optional`] to let nulls pass) and treat a value of the
//! wrong JSON kind as a fatal [`ConfigError::TypeMismatch`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use validoctor::rules::{in_range, min_length, not_blank};
//!
//! let name = not_blank();
//! let nickname = min_length(3).optional();
//! let score = in_range(1, 5);
//! ```

pub mod choice;
pub mod collection;
pub mod nullable;
pub mod numeric;
pub mod string;

pub use choice::one_of;
pub use collection::{max_size, not_empty};
pub use nullable::{not_null, null};
pub use numeric::{at_least, at_most, in_range};
pub use string::{matches, max_length, min_length, not_blank};

use serde_json::Value;

use crate::foundation::{ConfigError, Rule};

/// Ailment names reported by the predefined rules.
pub mod names {
    /// A required value is null.
    pub const NULL_VALUE: &str = "NULL_VALUE";
    /// A value that must be null is present.
    pub const VALUE_PRESENT: &str = "VALUE_PRESENT";
    /// A string is empty or only whitespace.
    pub const STRING_EMPTY: &str = "STRING_EMPTY";
    /// A string has fewer characters than allowed.
    pub const STRING_TOO_SHORT: &str = "STRING_TOO_SHORT";
    /// A string has more characters than allowed.
    pub const STRING_TOO_LONG: &str = "STRING_TOO_LONG";
    /// A string does not match a pattern.
    pub const STRING_PATTERN_MISMATCH: &str = "STRING_PATTERN_MISMATCH";
    /// A number lies outside an inclusive range.
    pub const NUMBER_OUT_OF_RANGE: &str = "NUMBER_OUT_OF_RANGE";
    /// A number is below a minimum.
    pub const NUMBER_TOO_SMALL: &str = "NUMBER_TOO_SMALL";
    /// A number is above a maximum.
    pub const NUMBER_TOO_LARGE: &str = "NUMBER_TOO_LARGE";
    /// A collection has no elements.
    pub const COLLECTION_EMPTY: &str = "COLLECTION_EMPTY";
    /// A collection has more elements than allowed.
    pub const COLLECTION_TOO_LARGE: &str = "COLLECTION_TOO_LARGE";
    /// A value is not one of the allowed values.
    pub const VALUE_NOT_ALLOWED: &str = "VALUE_NOT_ALLOWED";
}

// ============================================================================
// HELPERS
// ============================================================================

fn string_rule<F>(name: &'static str, test: F) -> Rule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Rule::try_new(name, move |value| match value {
        Value::Null => Ok(false),
        Value::String(s) => Ok(test(s)),
        other => Err(ConfigError::type_mismatch("a string", other)),
    })
}

fn number_rule<F>(name: &'static str, test: F) -> Rule
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    Rule::try_new(name, move |value| match value {
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_f64().is_some_and(&test)),
        other => Err(ConfigError::type_mismatch("a number", other)),
    })
}

/// Arrays count elements, objects count entries.
fn collection_rule<F>(name: &'static str, test: F) -> Rule
where
    F: Fn(usize) -> bool + Send + Sync + 'static,
{
    Rule::try_new(name, move |value| match value {
        Value::Null => Ok(false),
        Value::Array(items) => Ok(test(items.len())),
        Value::Object(map) => Ok(test(map.len())),
        other => Err(ConfigError::type_mismatch("a collection", other)),
    })
}
