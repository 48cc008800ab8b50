//! The atomic unit of validation: a predicate plus an ailment template.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::foundation::{Ailment, ConfigError, Severity};

type Predicate = dyn Fn(&Value) -> Result<bool, ConfigError> + Send + Sync;

/// A single-value check.
///
/// A rule is a pure predicate over a [`Value`] together with the name,
/// severity and parameters of the ailment it reports. Rules are stateless,
/// cheap to clone and can be shared across threads and examinations.
///
/// A predicate returns `Ok(false)` for ordinary invalid input. It returns
/// `Err` only when it cannot judge the value at all (for example a string
/// rule handed a number), which aborts the examination.
///
/// # Examples
///
/// ```rust,ignore
/// use validoctor::foundation::Rule;
///
/// let even = Rule::typed("NOT_EVEN", |n: &i64| n % 2 == 0).with_param("divisor", 2);
/// assert!(even.evaluate(&serde_json::json!(4))?.is_none());
/// assert!(even.evaluate(&serde_json::json!(3))?.is_some());
/// ```
#[derive(Clone)]
pub struct Rule {
    name: Cow<'static, str>,
    severity: Severity,
    params: IndexMap<String, Value>,
    optional: bool,
    test: Arc<Predicate>,
}

impl Rule {
    /// Creates a rule from an infallible predicate.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::try_new(name, move |value| Ok(test(value)))
    }

    /// Creates a rule from a predicate that may reject the value's shape.
    pub fn try_new<F>(name: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, ConfigError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            severity: Severity::Error,
            params: IndexMap::new(),
            optional: false,
            test: Arc::new(test),
        }
    }

    /// Creates a rule over a typed view of the value.
    ///
    /// The value is deserialized into `V` before the predicate runs; a value
    /// that does not deserialize is a [`ConfigError::TypeMismatch`]. Use
    /// `Option<V>` to accept nulls.
    pub fn typed<V, F>(name: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        V: DeserializeOwned,
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self::try_new(name, move |value| {
            let typed = V::deserialize(value)
                .map_err(|_| ConfigError::type_mismatch(std::any::type_name::<V>(), value))?;
            Ok(test(&typed))
        })
    }

    /// Binds a parameter reported with every ailment of this rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets the severity of reported ailments.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Shorthand for `with_severity(Severity::Warn)`.
    #[must_use = "builder methods must be chained or built"]
    pub fn warn(self) -> Self {
        self.with_severity(Severity::Warn)
    }

    /// Lets null values pass without consulting the predicate.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Rule name, used as the ailment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Severity of reported ailments.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Bound parameters.
    #[must_use]
    pub fn params(&self) -> &IndexMap<String, Value> {
        &self.params
    }

    /// Returns true if null values pass unconditionally.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Tests `value`, returning the ailment it causes, if any.
    ///
    /// The returned ailment has no field; the examiner attaches the location.
    pub fn evaluate(&self, value: &Value) -> Result<Option<Ailment>, ConfigError> {
        if self.optional && value.is_null() {
            return Ok(None);
        }

        if (self.test)(value)? {
            Ok(None)
        } else {
            Ok(Some(
                Ailment::new(self.name.clone(), self.severity)
                    .with_params(self.params.clone())
                    .with_invalid_value(value.clone()),
            ))
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("severity", &self.severity)
            .field("params", &self.params)
            .field("optional", &self.optional)
            .field("test", &"<predicate>")
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
