//! MULTI combinator - per-field rule sets over a patient's properties
//!
//! A [`MultiRule`] is an immutable, ordered list of [`Binding`]s. Each binding
//! names a field, optionally carries an applicability condition, and holds the
//! [`Check`] applied to that field's value. Built once, reused for every
//! examination, like a compiled schema.
//!
//! # Examples
//!
//! ```rust,ignore
//! use validoctor::combinators::{Binding, MultiRule};
//! use validoctor::rules::{not_blank, not_null, null};
//!
//! let nullity = MultiRule::structural("nullity", [
//!     Binding::rule("nutritionFacts", not_null()).when(|p: &Value| !p["skuId"].is_null()),
//!     Binding::rule("nutritionFacts", null()).when(|p: &Value| p["skuId"].is_null()),
//! ]);
//! let validity = MultiRule::structural("validity", [Binding::rule("name", not_blank())]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::combinators::{Check, ReducerRule};
use crate::foundation::{ConfigError, PropertyResolver, ReflectiveResolver, Rule, ValueResolver};

type Condition<T> = dyn Fn(&T) -> bool + Send + Sync;

// ============================================================================
// BINDING
// ============================================================================

/// A field of the patient paired with the check applied to it.
pub struct Binding<T> {
    field: String,
    condition: Option<Arc<Condition<T>>>,
    check: Check<T>,
}

impl<T> Binding<T> {
    /// Binds any check to `field`.
    pub fn new(field: impl Into<String>, check: impl Into<Check<T>>) -> Self {
        Self {
            field: field.into(),
            condition: None,
            check: check.into(),
        }
    }

    /// Binds a rule that tests the field value.
    pub fn rule(field: impl Into<String>, rule: Rule) -> Self {
        Self::new(field, Check::Rule(rule))
    }

    /// Binds a rule set that examines the field value as a nested patient.
    pub fn nested(field: impl Into<String>, rules: impl Into<Arc<MultiRule<Value>>>) -> Self {
        Self::new(field, Check::Nested(rules.into()))
    }

    /// Binds a check applied to every element of a collection field.
    pub fn each(field: impl Into<String>, check: impl Into<Check<Value>>) -> Self {
        Self::new(field, Check::each(check))
    }

    /// Binds a reducer rule. Its ailments are reported under the reducer's name.
    pub fn reduce(reducer: ReducerRule<T>) -> Self {
        Self::new(reducer.name().to_owned(), Check::Reduce(reducer))
    }

    /// Applies the binding only when `condition` holds for the patient.
    ///
    /// A skipped binding is not visited at all: its field is not resolved and
    /// nothing nested under it runs.
    #[must_use = "builder methods must be chained or built"]
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// The bound field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The check applied to the field.
    #[must_use]
    pub fn check(&self) -> &Check<T> {
        &self.check
    }

    /// Returns true if the binding has an applicability condition.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Evaluates the applicability condition against `patient`.
    pub fn applies_to(&self, patient: &T) -> bool {
        self.condition.as_ref().is_none_or(|condition| condition(patient))
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            condition: self.condition.clone(),
            check: self.check.clone(),
        }
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("field", &self.field)
            .field("condition", &self.condition.as_ref().map(|_| "<function>"))
            .field("check", &self.check)
            .finish()
    }
}

// ============================================================================
// MULTI RULE
// ============================================================================

/// A named, ordered rule set over the properties of a patient of type `T`.
///
/// Bindings run in declaration order, which is also the order ailments are
/// reported in.
pub struct MultiRule<T> {
    name: Cow<'static, str>,
    resolver: Arc<dyn PropertyResolver<T>>,
    bindings: Vec<Binding<T>>,
}

impl<T> MultiRule<T> {
    /// Creates a rule set resolving fields through `resolver`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownField`] if the resolver knows its fields
    /// and a binding names one it cannot resolve.
    pub fn new<R>(
        name: impl Into<Cow<'static, str>>,
        resolver: R,
        bindings: impl IntoIterator<Item = Binding<T>>,
    ) -> Result<Self, ConfigError>
    where
        R: PropertyResolver<T> + 'static,
    {
        let bindings: Vec<_> = bindings.into_iter().collect();

        for binding in &bindings {
            if matches!(binding.check, Check::Reduce(_)) {
                continue;
            }
            if resolver.knows_field(&binding.field) == Some(false) {
                return Err(ConfigError::unknown_field(binding.field.clone()));
            }
        }

        Ok(Self::assemble(name, Arc::new(resolver), bindings))
    }

    fn assemble(
        name: impl Into<Cow<'static, str>>,
        resolver: Arc<dyn PropertyResolver<T>>,
        bindings: Vec<Binding<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            resolver,
            bindings,
        }
    }

    /// Rule set name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bindings in evaluation order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding<T>] {
        &self.bindings
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolves `field` on `patient` with this rule set's resolver.
    pub fn resolve(&self, patient: &T, field: &str) -> Result<Value, ConfigError> {
        self.resolver.resolve(patient, field)
    }
}

impl MultiRule<Value> {
    /// Creates a rule set over dynamic [`Value`] patients.
    ///
    /// Fields are dotted paths; see [`ValueResolver`].
    pub fn structural(
        name: impl Into<Cow<'static, str>>,
        bindings: impl IntoIterator<Item = Binding<Value>>,
    ) -> Self {
        Self::assemble(name, Arc::new(ValueResolver), bindings.into_iter().collect())
    }
}

impl<T: Serialize + 'static> MultiRule<T> {
    /// Creates a rule set discovering the fields of `T` through serde.
    ///
    /// Fields are the serialized names; see [`ReflectiveResolver`].
    pub fn reflective(
        name: impl Into<Cow<'static, str>>,
        bindings: impl IntoIterator<Item = Binding<T>>,
    ) -> Self {
        Self::assemble(
            name,
            Arc::new(ReflectiveResolver::<T>::new()),
            bindings.into_iter().collect(),
        )
    }
}

impl<T> Clone for MultiRule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            resolver: Arc::clone(&self.resolver),
            bindings: self.bindings.clone(),
        }
    }
}

impl<T> fmt::Debug for MultiRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiRule")
            .field("name", &self.name)
            .field("resolver", &"<resolver>")
            .field("bindings", &self.bindings)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
