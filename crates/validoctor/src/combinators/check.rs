//! CHECK - the closed set of things a binding can apply to a field

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::combinators::{MultiRule, ReducerRule};
use crate::foundation::Rule;

// ============================================================================
// CHECK
// ============================================================================

/// What a binding applies to its field.
///
/// The four kinds are dispatched by a single traversal function in the
/// [`Examiner`](crate::examiner::Examiner), so every kind of nesting is
/// handled by one exhaustive `match`.
///
/// # Examples
///
/// ```rust,ignore
/// use validoctor::combinators::Check;
/// use validoctor::rules::in_range;
///
/// // every element of the collection must be within 1..=5
/// let scores: Check<serde_json::Value> = Check::each(in_range(1, 5));
/// ```
pub enum Check<T> {
    /// Tests the field value directly.
    Rule(Rule),
    /// Treats the field value as a nested patient. A null value is skipped.
    Nested(Arc<MultiRule<Value>>),
    /// Applies the inner check to every element of a collection field.
    ForElements(Box<Check<Value>>),
    /// Reduces sibling fields of the current patient, then tests the result.
    Reduce(ReducerRule<T>),
}

impl<T> Check<T> {
    /// Wraps a check so it runs once per collection element.
    pub fn each(inner: impl Into<Check<Value>>) -> Self {
        Self::ForElements(Box::new(inner.into()))
    }

    /// Short name of the check kind, used in traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Rule(_) => "rule",
            Self::Nested(_) => "nested",
            Self::ForElements(_) => "for_elements",
            Self::Reduce(_) => "reduce",
        }
    }
}

impl<T> Clone for Check<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Rule(rule) => Self::Rule(rule.clone()),
            Self::Nested(multi) => Self::Nested(Arc::clone(multi)),
            Self::ForElements(inner) => Self::ForElements(inner.clone()),
            Self::Reduce(reducer) => Self::Reduce(reducer.clone()),
        }
    }
}

impl<T> fmt::Debug for Check<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => f.debug_tuple("Rule").field(rule).finish(),
            Self::Nested(multi) => f.debug_tuple("Nested").field(multi).finish(),
            Self::ForElements(inner) => f.debug_tuple("ForElements").field(inner).finish(),
            Self::Reduce(reducer) => f.debug_tuple("Reduce").field(reducer).finish(),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl<T> From<Rule> for Check<T> {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

impl<T> From<MultiRule<Value>> for Check<T> {
    fn from(multi: MultiRule<Value>) -> Self {
        Self::Nested(Arc::new(multi))
    }
}

impl<T> From<Arc<MultiRule<Value>>> for Check<T> {
    fn from(multi: Arc<MultiRule<Value>>) -> Self {
        Self::Nested(multi)
    }
}

impl<T> From<ReducerRule<T>> for Check<T> {
    fn from(reducer: ReducerRule<T>) -> Self {
        Self::Reduce(reducer)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{Binding, Reducer};

    fn positive() -> Rule {
        Rule::typed("NOT_POSITIVE", |n: &i64| *n > 0)
    }

    #[test]
    fn test_conversions_pick_the_right_kind() {
        let rule: Check<Value> = positive().into();
        assert_eq!(rule.kind(), "rule");

        let nested: Check<Value> =
            MultiRule::structural("inner", [Binding::rule("a", positive())]).into();
        assert_eq!(nested.kind(), "nested");

        let reducer = ReducerRule::structural(
            "ONE_OF",
            ["a", "b"],
            Reducer::count_present(),
            Rule::typed("TOO_MANY", |n: &u64| *n <= 1),
        )
        .unwrap();
        let reduce: Check<Value> = reducer.into();
        assert_eq!(reduce.kind(), "reduce");
    }

    #[test]
    fn test_each_wraps_inner_check() {
        let check: Check<Value> = Check::each(positive());
        match &check {
            Check::ForElements(inner) => assert_eq!(inner.kind(), "rule"),
            other => panic!("expected ForElements, got {}", other.kind()),
        }
        assert_eq!(check.kind(), "for_elements");
    }

    #[test]
    fn test_clone_shares_nested_rules() {
        let multi = Arc::new(MultiRule::structural(
            "inner",
            [Binding::rule("a", positive())],
        ));
        let check: Check<Value> = Arc::clone(&multi).into();
        let copy = check.clone();

        match copy {
            Check::Nested(shared) => assert!(Arc::ptr_eq(&shared, &multi)),
            other => panic!("expected Nested, got {}", other.kind()),
        }
    }

    #[test]
    fn test_debug_names_variant() {
        let check: Check<Value> = positive().into();
        assert!(format!("{check:?}").starts_with("Rule("));
    }
}
