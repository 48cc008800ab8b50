//! REDUCER combinator - constraints spanning several sibling fields
//!
//! A [`ReducerRule`] resolves a set of source fields from the same patient,
//! folds their values into one derived value with a [`Reducer`], and tests
//! that value with a [`Rule`]:
//!
//! ```rust,ignore
//! use validoctor::combinators::{Reducer, ReducerRule};
//! use validoctor::rules::at_most;
//!
//! // at most one of the identifiers may be set
//! let one_id = ReducerRule::structural(
//!     "SINGLE_IDENTIFIER",
//!     ["email", "phone", "username"],
//!     Reducer::count_present(),
//!     at_most(1),
//! )?;
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::foundation::{
    Ailment, ConfigError, PropertyResolver, ReflectiveResolver, Rule, ValueResolver,
};

// ============================================================================
// REDUCER
// ============================================================================

type ReduceFn = dyn Fn(&[Value]) -> Result<Value, ConfigError> + Send + Sync;

/// A named reduction of several values into one.
///
/// A reducer may declare a fixed arity; wiring it to a different number of
/// sources is rejected when the [`ReducerRule`] is built.
#[derive(Clone)]
pub struct Reducer {
    name: Cow<'static, str>,
    arity: Option<usize>,
    reduce: Arc<ReduceFn>,
}

impl Reducer {
    /// Creates a reducer from a function over the source values.
    pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, reduce: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ConfigError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: None,
            reduce: Arc::new(reduce),
        }
    }

    /// Requires exactly `arity` source values.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Reducer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared arity, if fixed.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Folds `values` into one value.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ReducerArity`] when the arity is fixed and does not
    /// match, or whatever the reduction itself rejects.
    pub fn apply(&self, values: &[Value]) -> Result<Value, ConfigError> {
        match self.arity {
            Some(expected) if expected != values.len() => Err(self.arity_error(values.len())),
            _ => (self.reduce)(values),
        }
    }

    fn arity_error(&self, actual: usize) -> ConfigError {
        ConfigError::ReducerArity {
            reducer: self.name.to_string(),
            expected: self.arity.unwrap_or(actual),
            actual,
        }
    }

    // ------------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------------

    /// Number of non-null values.
    #[must_use]
    pub fn count_present() -> Self {
        Self::from_fn("count_present", |values| {
            Ok(Value::from(values.iter().filter(|v| !v.is_null()).count()))
        })
    }

    /// Number of truthy values: not null, not `false`, not zero, not empty.
    #[must_use]
    pub fn count_truthy() -> Self {
        Self::from_fn("count_truthy", |values| {
            Ok(Value::from(values.iter().filter(|v| is_truthy(v)).count()))
        })
    }

    /// Sum of the numeric values. Nulls are skipped.
    #[must_use]
    pub fn sum() -> Self {
        Self::from_fn("sum", |values| {
            let numbers = numbers(values)?;
            let integers: Option<Vec<i64>> = numbers.iter().map(|n| n.as_i64()).collect();
            let exact = integers.and_then(|ints| {
                ints.into_iter()
                    .try_fold(0_i64, |acc, n| acc.checked_add(n))
            });
            Ok(match exact {
                Some(total) => Value::from(total),
                None => float(numbers.iter().filter_map(|n| n.as_f64()).sum()),
            })
        })
    }

    /// Largest numeric value, or null when every value is null.
    #[must_use]
    pub fn max() -> Self {
        Self::from_fn("max", |values| {
            extreme(values, |candidate, best| candidate > best)
        })
    }

    /// Smallest numeric value, or null when every value is null.
    #[must_use]
    pub fn min() -> Self {
        Self::from_fn("min", |values| {
            extreme(values, |candidate, best| candidate < best)
        })
    }

    /// `true` if every value equals the first one.
    #[must_use]
    pub fn all_equal() -> Self {
        Self::from_fn("all_equal", |values| {
            Ok(Value::Bool(values.windows(2).all(|pair| pair[0] == pair[1])))
        })
    }

    /// First value minus second value; null if either is null.
    #[must_use]
    pub fn difference() -> Self {
        Self::from_fn("difference", |values| {
            let (left, right) = match values {
                [Value::Null, _] | [_, Value::Null] => return Ok(Value::Null),
                [left, right] => (number(left)?, number(right)?),
                _ => return Ok(Value::Null),
            };
            let exact = left
                .as_i64()
                .zip(right.as_i64())
                .and_then(|(l, r)| l.checked_sub(r));
            Ok(match exact {
                Some(diff) => Value::from(diff),
                None => float(left.as_f64().unwrap_or(0.0) - right.as_f64().unwrap_or(0.0)),
            })
        })
        .with_arity(2)
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("reduce", &"<function>")
            .finish()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn number(value: &Value) -> Result<&Number, ConfigError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(ConfigError::type_mismatch("a number", other)),
    }
}

fn numbers(values: &[Value]) -> Result<Vec<&Number>, ConfigError> {
    values
        .iter()
        .filter(|v| !v.is_null())
        .map(number)
        .collect()
}

fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn extreme(values: &[Value], wins: impl Fn(f64, f64) -> bool) -> Result<Value, ConfigError> {
    let mut best: Option<(&Number, f64)> = None;
    for n in numbers(values)? {
        let Some(current) = n.as_f64() else { continue };
        best = match best {
            Some((_, top)) if !wins(current, top) => best,
            _ => Some((n, current)),
        };
    }
    Ok(best.map_or(Value::Null, |(n, _)| Value::Number(n.clone())))
}

// ============================================================================
// REDUCER RULE
// ============================================================================

/// Reduces sibling fields of a patient to one value and tests it.
pub struct ReducerRule<T> {
    name: Cow<'static, str>,
    resolver: Arc<dyn PropertyResolver<T>>,
    sources: IndexSet<String>,
    reducer: Reducer,
    rule: Rule,
}

impl<T> ReducerRule<T> {
    /// Creates a reducer rule resolving its sources through `resolver`.
    ///
    /// Sources form an ordered set: duplicates collapse and the reducer sees
    /// values in first-declared order.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoSources`] when `sources` is empty.
    /// - [`ConfigError::ReducerArity`] when the reducer's fixed arity differs
    ///   from the number of distinct sources.
    /// - [`ConfigError::UnknownField`] when the resolver knows its fields and
    ///   a source is not one of them.
    pub fn new<R, S>(
        name: impl Into<Cow<'static, str>>,
        resolver: R,
        sources: impl IntoIterator<Item = S>,
        reducer: Reducer,
        rule: Rule,
    ) -> Result<Self, ConfigError>
    where
        R: PropertyResolver<T> + 'static,
        S: Into<String>,
    {
        Self::assemble(
            name.into(),
            Arc::new(resolver),
            sources.into_iter().map(Into::into).collect(),
            reducer,
            rule,
        )
    }

    fn assemble(
        name: Cow<'static, str>,
        resolver: Arc<dyn PropertyResolver<T>>,
        sources: IndexSet<String>,
        reducer: Reducer,
        rule: Rule,
    ) -> Result<Self, ConfigError> {
        if sources.is_empty() {
            return Err(ConfigError::NoSources {
                reducer: name.into_owned(),
            });
        }
        if let Some(expected) = reducer.arity() {
            if expected != sources.len() {
                return Err(reducer.arity_error(sources.len()));
            }
        }
        if let Some(unknown) = sources
            .iter()
            .find(|source| resolver.knows_field(source) == Some(false))
        {
            return Err(ConfigError::unknown_field(unknown.clone()));
        }

        Ok(Self {
            name,
            resolver,
            sources,
            reducer,
            rule,
        })
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source field names in reduction order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    /// The reduction applied to the source values.
    #[must_use]
    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// The rule tested against the derived value.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Resolves every source on `patient` and reduces them.
    pub fn derive(&self, patient: &T) -> Result<Value, ConfigError> {
        let values = self
            .sources
            .iter()
            .map(|source| self.resolver.resolve(patient, source))
            .collect::<Result<Vec<_>, _>>()?;
        self.reducer.apply(&values)
    }

    /// Tests the derived value of `patient`.
    ///
    /// A reported ailment carries the rule's params plus `sources`, and the
    /// derived value as its invalid value.
    pub fn evaluate(&self, patient: &T) -> Result<Option<Ailment>, ConfigError> {
        let derived = self.derive(patient)?;
        Ok(self.rule.evaluate(&derived)?.map(|ailment| {
            ailment.with_param("sources", self.sources.iter().cloned().collect::<Vec<_>>())
        }))
    }
}

impl ReducerRule<Value> {
    /// Creates a reducer rule over dynamic [`Value`] patients.
    pub fn structural<S: Into<String>>(
        name: impl Into<Cow<'static, str>>,
        sources: impl IntoIterator<Item = S>,
        reducer: Reducer,
        rule: Rule,
    ) -> Result<Self, ConfigError> {
        Self::new(name, ValueResolver, sources, reducer, rule)
    }
}

impl<T: Serialize + 'static> ReducerRule<T> {
    /// Creates a reducer rule discovering the fields of `T` through serde.
    pub fn reflective<S: Into<String>>(
        name: impl Into<Cow<'static, str>>,
        sources: impl IntoIterator<Item = S>,
        reducer: Reducer,
        rule: Rule,
    ) -> Result<Self, ConfigError> {
        Self::new(name, ReflectiveResolver::<T>::new(), sources, reducer, rule)
    }
}

impl<T> Clone for ReducerRule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            resolver: Arc::clone(&self.resolver),
            sources: self.sources.clone(),
            reducer: self.reducer.clone(),
            rule: self.rule.clone(),
        }
    }
}

impl<T> fmt::Debug for ReducerRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerRule")
            .field("name", &self.name)
            .field("sources", &self.sources)
            .field("reducer", &self.reducer)
            .field("rule", &self.rule)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
