//! Nullity rules

use crate::foundation::Rule;
use crate::rules::names;

/// Requires the value to be present.
///
/// Pair it with a nested rule set on the same field: nested rule sets skip
/// null values, so absence is only reported when this rule asks for it.
#[must_use]
pub fn not_null() -> Rule {
    Rule::new(names::NULL_VALUE, |value| !value.is_null())
}

/// Requires the value to be absent.
#[must_use]
pub fn null() -> Rule {
    Rule::new(names::VALUE_PRESENT, serde_json::Value::is_null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_not_null() {
        assert!(not_null().evaluate(&json!(0)).unwrap().is_none());
        let ailment = not_null().evaluate(&Value::Null).unwrap().unwrap();
        assert_eq!(ailment.name(), "NULL_VALUE");
        assert_eq!(ailment.invalid_value(), Some(&Value::Null));
    }

    #[test]
    fn test_null() {
        assert!(null().evaluate(&Value::Null).unwrap().is_none());
        let ailment = null().evaluate(&json!({ "kcal": 120 })).unwrap().unwrap();
        assert_eq!(ailment.name(), "VALUE_PRESENT");
    }
}
