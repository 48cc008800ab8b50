//! Choice rules

use serde_json::Value;

use crate::foundation::Rule;
use crate::rules::names;

/// Requires the value to equal one of `allowed`.
///
/// Null passes only if null is listed.
#[must_use]
pub fn one_of<I, V>(allowed: I) -> Rule
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
    let param = Value::Array(allowed.clone());
    Rule::new(names::VALUE_NOT_ALLOWED, move |value| allowed.contains(value))
        .with_param("allowed", param)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_of() {
        let unit = one_of(["g", "kg", "lb"]);
        assert!(unit.evaluate(&json!("kg")).unwrap().is_none());

        let ailment = unit.evaluate(&json!("oz")).unwrap().unwrap();
        assert_eq!(ailment.name(), "VALUE_NOT_ALLOWED");
        assert_eq!(ailment.param("allowed"), Some(&json!(["g", "kg", "lb"])));
    }

    #[test]
    fn test_null_needs_listing() {
        assert!(one_of([1, 2]).evaluate(&Value::Null).unwrap().is_some());
        assert!(
            one_of([Value::Null, json!(1)])
                .evaluate(&Value::Null)
                .unwrap()
                .is_none()
        );
    }
}
