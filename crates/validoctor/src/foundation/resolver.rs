//! Property resolution strategies
//!
//! A [`PropertyResolver`] answers one question: given a patient and a field
//! name, what is the field's current value? Three strategies are provided:
//!
//! - [`ValueResolver`] walks a dynamic [`Value`] patient (dotted paths).
//! - [`ReflectiveResolver`] discovers fields of any `Serialize` type by
//!   inspecting its serialized form, so no per-field glue is needed.
//! - [`AccessorResolver`] uses explicitly registered getters per field name.
//!
//! Any `Fn(&T, &str) -> Result<Value, ConfigError>` closure is a resolver too.
//!
//! Resolving an unknown field is a [`ConfigError`], never an ailment.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::foundation::ConfigError;
use crate::foundation::error::kind_of;

// ============================================================================
// RESOLVER TRAIT
// ============================================================================

/// Resolves a named field of a patient to its current value.
pub trait PropertyResolver<T: ?Sized>: Send + Sync {
    /// Returns the value of `field` on `patient`.
    fn resolve(&self, patient: &T, field: &str) -> Result<Value, ConfigError>;

    /// Whether `field` can be resolved on every patient of type `T`.
    ///
    /// `None` means the resolver cannot tell before seeing a patient. Rule
    /// construction uses this to reject unknown fields early.
    fn knows_field(&self, field: &str) -> Option<bool> {
        let _ = field;
        None
    }
}

impl<T, F> PropertyResolver<T> for F
where
    T: ?Sized,
    F: Fn(&T, &str) -> Result<Value, ConfigError> + Send + Sync,
{
    fn resolve(&self, patient: &T, field: &str) -> Result<Value, ConfigError> {
        self(patient, field)
    }
}

// ============================================================================
// STRUCTURAL
// ============================================================================

/// Resolves dotted paths against a dynamic [`Value`] patient.
///
/// - `a.b` descends through objects; numeric segments index arrays.
/// - A null met halfway resolves to null (the nested object is absent).
/// - A missing key or index is [`ConfigError::UnknownField`].
/// - A scalar patient, or a scalar met halfway, is [`ConfigError::NotAnObject`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueResolver;

impl ValueResolver {
    /// Looks `path` up in `patient`, borrowing the result.
    pub fn lookup<'v>(patient: &'v Value, path: &str) -> Result<&'v Value, ConfigError> {
        if !matches!(patient, Value::Object(_) | Value::Array(_)) {
            return Err(ConfigError::NotAnObject {
                field: path.to_owned(),
                actual: kind_of(patient),
            });
        }

        let mut current = patient;
        for segment in path.split('.') {
            current = match current {
                Value::Null => return Ok(current),
                Value::Object(map) => map
                    .get(segment)
                    .ok_or_else(|| ConfigError::unknown_field(path))?,
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index))
                    .ok_or_else(|| ConfigError::unknown_field(path))?,
                other => {
                    return Err(ConfigError::NotAnObject {
                        field: path.to_owned(),
                        actual: kind_of(other),
                    });
                }
            };
        }
        Ok(current)
    }
}

impl PropertyResolver<Value> for ValueResolver {
    fn resolve(&self, patient: &Value, field: &str) -> Result<Value, ConfigError> {
        Self::lookup(patient, field).cloned()
    }
}

// ============================================================================
// REFLECTIVE
// ============================================================================

/// Discovers the fields of any `Serialize` type through its serialized form.
///
/// Field names are the serialized names, so `#[serde(rename_all = ...)]`
/// applies. Each resolution serializes the patient; prefer
/// [`AccessorResolver`] on hot paths with large patients.
pub struct ReflectiveResolver<T: ?Sized> {
    _patient: PhantomData<fn(&T)>,
}

impl<T: ?Sized> ReflectiveResolver<T> {
    /// Creates a reflective resolver for `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _patient: PhantomData,
        }
    }
}

impl<T: ?Sized> Default for ReflectiveResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for ReflectiveResolver<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ReflectiveResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReflectiveResolver<{}>", std::any::type_name::<T>())
    }
}

impl<T> PropertyResolver<T> for ReflectiveResolver<T>
where
    T: Serialize + ?Sized,
{
    fn resolve(&self, patient: &T, field: &str) -> Result<Value, ConfigError> {
        let snapshot = serde_json::to_value(patient)?;
        ValueResolver::lookup(&snapshot, field).cloned()
    }
}

// ============================================================================
// ACCESSOR-BASED
// ============================================================================

type Getter<T> = dyn Fn(&T) -> Result<Value, ConfigError> + Send + Sync;

/// Resolves fields through explicitly registered getters.
///
/// Knows its field names, so rules built on it reject unknown fields at
/// construction time.
///
/// # Examples
///
/// ```rust,ignore
/// use validoctor::foundation::AccessorResolver;
///
/// struct Product { name: String, sku_id: Option<u64> }
///
/// let resolver = AccessorResolver::new()
///     .field("name", |p: &Product| &p.name)
///     .field("skuId", |p: &Product| &p.sku_id);
/// ```
pub struct AccessorResolver<T: ?Sized> {
    getters: IndexMap<String, Box<Getter<T>>>,
}

impl<T: ?Sized> AccessorResolver<T> {
    /// Creates a resolver with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self {
            getters: IndexMap::new(),
        }
    }

    /// Registers a field by borrowing it from the patient.
    #[must_use = "builder methods must be chained or built"]
    pub fn field<U, F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        U: Serialize + ?Sized,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        self.getters.insert(
            name.into(),
            Box::new(move |patient| Ok(serde_json::to_value(accessor(patient))?)),
        );
        self
    }

    /// Registers a field computed as a [`Value`].
    #[must_use = "builder methods must be chained or built"]
    pub fn getter<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.getters
            .insert(name.into(), Box::new(move |patient| Ok(getter(patient))));
        self
    }

    /// Registered field names, in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.getters.keys().map(String::as_str)
    }
}

impl<T: ?Sized> Default for AccessorResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for AccessorResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorResolver")
            .field("fields", &self.getters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: ?Sized> PropertyResolver<T> for AccessorResolver<T> {
    fn resolve(&self, patient: &T, field: &str) -> Result<Value, ConfigError> {
        let getter = self
            .getters
            .get(field)
            .ok_or_else(|| ConfigError::unknown_field(field))?;
        getter(patient)
    }

    fn knows_field(&self, field: &str) -> Option<bool> {
        Some(self.getters.contains_key(field))
    }
}

// ============================================================================
// TESTS
// ============================================================================
