//! Collection rules
//!
//! Arrays are sized by element count, objects by entry count.

use crate::foundation::Rule;
use crate::rules::{collection_rule, names};

/// Requires at least one element.
#[must_use]
pub fn not_empty() -> Rule {
    collection_rule(names::COLLECTION_EMPTY, |len| len > 0)
}

/// Requires at most `max` elements.
#[must_use]
pub fn max_size(max: usize) -> Rule {
    collection_rule(names::COLLECTION_TOO_LARGE, move |len| len <= max).with_param("max", max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ConfigError;
    use serde_json::{Value, json};

    #[test]
    fn test_not_empty() {
        assert!(not_empty().evaluate(&json!([1])).unwrap().is_none());
        assert!(not_empty().evaluate(&json!({ "a": 1 })).unwrap().is_none());
        assert!(not_empty().evaluate(&json!([])).unwrap().is_some());
        assert!(not_empty().evaluate(&Value::Null).unwrap().is_some());
    }

    #[test]
    fn test_max_size() {
        let rule = max_size(2);
        assert!(rule.evaluate(&json!([1, 2])).unwrap().is_none());

        let ailment = rule.evaluate(&json!([1, 2, 3])).unwrap().unwrap();
        assert_eq!(ailment.name(), "COLLECTION_TOO_LARGE");
        assert_eq!(ailment.param("max"), Some(&json!(2)));
    }

    #[test]
    fn test_string_is_not_a_collection() {
        let err = not_empty().evaluate(&json!("abc")).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }
}
