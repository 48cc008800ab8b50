//! A single recorded rule violation.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// SEVERITY
// ============================================================================

/// How serious an ailment is.
///
/// Only [`Severity::Error`] makes a [`Diagnosis`](crate::foundation::Diagnosis)
/// invalid; warnings are reported but do not affect validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Violation that makes the patient invalid (default).
    #[default]
    Error,
    /// Violation worth reporting that does not invalidate the patient.
    Warn,
}

impl Severity {
    /// Returns true for [`Severity::Error`].
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Wire name of the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// AILMENT
// ============================================================================

/// One rule violation found on a patient.
///
/// Immutable once built. Carries the rule name, its severity, the parameters
/// the rule was configured with, where in the patient it was found and the
/// offending value, which is enough for a client to render a message.
///
/// # Examples
///
/// ```rust,ignore
/// use validoctor::foundation::{Ailment, Severity};
///
/// let ailment = Ailment::new("NUMBER_OUT_OF_RANGE", Severity::Error)
///     .with_field("reviewScores[1]")
///     .with_param("min", 1)
///     .with_param("max", 5)
///     .with_invalid_value(6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ailment {
    name: Cow<'static, str>,
    severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(default)]
    params: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    invalid_value: Option<Value>,
}

impl Ailment {
    /// Creates an ailment with no field, params or invalid value.
    pub fn new(name: impl Into<Cow<'static, str>>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
            field: None,
            params: IndexMap::new(),
            invalid_value: None,
        }
    }

    /// Sets the location of the violation within the patient.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replaces all parameters.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_params(mut self, params: IndexMap<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// Records the offending value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_invalid_value(mut self, value: impl Into<Value>) -> Self {
        self.invalid_value = Some(value.into());
        self
    }

    /// Sets the severity.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Name of the violated rule.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Severity of the violation.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Location of the violation, `None` when the patient itself failed.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Parameters the violated rule was configured with.
    #[must_use]
    pub fn params(&self) -> &IndexMap<String, Value> {
        &self.params
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// The value that failed the rule.
    #[must_use]
    pub fn invalid_value(&self) -> Option<&Value> {
        self.invalid_value.as_ref()
    }
}

impl fmt::Display for Ailment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{field}] {}", self.name)?;
        } else {
            f.write_str(&self.name)?;
        }

        if self.severity == Severity::Warn {
            f.write_str(" (warning)")?;
        }

        if !self.params.is_empty() {
            f.write_str(" (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            f.write_str("])")?;
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
