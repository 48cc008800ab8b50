//! Numeric rules
//!
//! Bounds are inclusive and compared as `f64`; they are reported in the
//! ailment params as given.

use serde_json::Value;

use crate::foundation::Rule;
use crate::rules::{names, number_rule};

/// Requires `min <= value <= max`.
#[must_use]
pub fn in_range<N>(min: N, max: N) -> Rule
where
    N: Into<f64> + Into<Value> + Copy,
{
    let (low, high): (f64, f64) = (min.into(), max.into());
    number_rule(names::NUMBER_OUT_OF_RANGE, move |n| low <= n && n <= high)
        .with_param("min", min)
        .with_param("max", max)
}

/// Requires `value >= min`.
#[must_use]
pub fn at_least<N>(min: N) -> Rule
where
    N: Into<f64> + Into<Value> + Copy,
{
    let low: f64 = min.into();
    number_rule(names::NUMBER_TOO_SMALL, move |n| n >= low).with_param("min", min)
}

/// Requires `value <= max`.
#[must_use]
pub fn at_most<N>(max: N) -> Rule
where
    N: Into<f64> + Into<Value> + Copy,
{
    let high: f64 = max.into();
    number_rule(names::NUMBER_TOO_LARGE, move |n| n <= high).with_param("max", max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ConfigError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(1), true)]
    #[case(json!(5), true)]
    #[case(json!(3.5), true)]
    #[case(json!(0), false)]
    #[case(json!(6), false)]
    #[case(Value::Null, false)]
    fn test_in_range(#[case] value: Value, #[case] healthy: bool) {
        assert_eq!(in_range(1, 5).evaluate(&value).unwrap().is_none(), healthy);
    }

    #[test]
    fn test_in_range_ailment_payload() {
        let ailment = in_range(1, 5).evaluate(&json!(6)).unwrap().unwrap();
        assert_eq!(ailment.name(), "NUMBER_OUT_OF_RANGE");
        assert_eq!(ailment.param("min"), Some(&json!(1)));
        assert_eq!(ailment.param("max"), Some(&json!(5)));
        assert_eq!(ailment.invalid_value(), Some(&json!(6)));
    }

    #[test]
    fn test_bounds() {
        assert!(at_least(0.5).evaluate(&json!(0.5)).unwrap().is_none());
        assert!(at_least(0.5).evaluate(&json!(0.4)).unwrap().is_some());
        assert!(at_most(10_u32).evaluate(&json!(10)).unwrap().is_none());
        assert!(at_most(10_u32).evaluate(&json!(11)).unwrap().is_some());
    }

    #[test]
    fn test_wrong_kind_is_fatal() {
        let err = at_most(3).evaluate(&json!("3")).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { actual: "a string", .. }));
    }
}
