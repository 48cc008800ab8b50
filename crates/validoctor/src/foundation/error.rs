//! Error types for examinations
//!
//! Two disjoint classes of failure exist:
//!
//! - **Ailments** are expected, data-driven findings. They never appear here;
//!   they are collected into a [`Diagnosis`].
//! - **Configuration errors** ([`ConfigError`]) mean the rules do not fit the
//!   patient's shape (unknown field, wrong value kind, bad reducer arity). They
//!   abort the whole examination and are never downgraded to an ailment.
//!
//! [`ExamineError`] is what the [`Validoctor`](crate::doctor::Validoctor)
//! façade returns: either a fatal configuration error, or an unhealthy
//! diagnosis raised because the exceptional trait is set.

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::Diagnosis;

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// A rule set does not match the patient it is applied to.
///
/// Always fatal: the examination stops immediately and no partial diagnosis
/// is produced, regardless of the pedantic and exceptional traits.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The field path does not exist on the patient.
    #[error("field `{field}` cannot be resolved on the patient")]
    UnknownField {
        /// The unresolvable field path.
        field: String,
    },

    /// A field path walked into something that has no fields.
    #[error("cannot resolve `{field}`: patient is {actual}, not an object")]
    NotAnObject {
        /// The field path being resolved.
        field: String,
        /// JSON kind of the value found instead.
        actual: &'static str,
    },

    /// Per-element validation was requested on a value that is not a collection.
    #[error("field `{field}` is {actual}, not a collection")]
    NotACollection {
        /// Location of the offending value.
        field: String,
        /// JSON kind of the value found instead.
        actual: &'static str,
    },

    /// A predicate or reducer received a value of the wrong kind.
    #[error("expected {expected}, found {actual}")]
    TypeMismatch {
        /// What the predicate or reducer accepts.
        expected: Cow<'static, str>,
        /// JSON kind of the value received.
        actual: &'static str,
    },

    /// A fixed-arity reducer was wired to the wrong number of source fields.
    #[error("reducer `{reducer}` takes {expected} value(s) but was given {actual}")]
    ReducerArity {
        /// Reducer name.
        reducer: String,
        /// Arity the reducer declares.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A reducer rule was declared without any source field.
    #[error("reducer rule `{reducer}` has no source fields")]
    NoSources {
        /// Reducer rule name.
        reducer: String,
    },

    /// A rule predicate or reducer failed while examining a field.
    #[error("rule `{rule}` failed at `{field}`: {source}")]
    InRule {
        /// Name of the rule that failed.
        rule: String,
        /// Location of the examined value.
        field: String,
        /// The underlying failure.
        #[source]
        source: Box<ConfigError>,
    },

    /// A field failed to resolve inside a nested patient.
    #[error("within `{path}`: {source}")]
    Within {
        /// Location of the nested patient.
        path: String,
        /// The underlying failure.
        #[source]
        source: Box<ConfigError>,
    },

    /// A regular expression given to a rule does not compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The patient could not be turned into an inspectable value.
    #[error("patient could not be inspected: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Free-form failure raised by a caller-supplied predicate or reducer.
    #[error("{message}")]
    Custom {
        /// Description of the failure.
        message: Cow<'static, str>,
    },
}

impl ConfigError {
    /// Creates a [`ConfigError::TypeMismatch`] for `actual`.
    pub fn type_mismatch(expected: impl Into<Cow<'static, str>>, actual: &Value) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: kind_of(actual),
        }
    }

    /// Creates a [`ConfigError::UnknownField`].
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Creates a [`ConfigError::Custom`].
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// Strips [`InRule`](Self::InRule) and [`Within`](Self::Within) context
    /// and returns the underlying error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InRule { source, .. } | Self::Within { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Name of the JSON kind of `value`, for error messages.
pub(crate) const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// EXAMINE ERROR
// ============================================================================

/// Error returned by [`Validoctor`](crate::doctor::Validoctor) examinations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExamineError {
    /// The rules do not fit the patient.
    #[error("rule configuration does not fit the patient: {0}")]
    Config(#[from] ConfigError),

    /// The patient is invalid and the exceptional trait is set.
    #[error("patient is unhealthy: {0}")]
    Unhealthy(Diagnosis),
}

impl ExamineError {
    /// Returns the attached diagnosis, if this is an unhealthy outcome.
    #[must_use]
    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match self {
            Self::Unhealthy(diagnosis) => Some(diagnosis),
            Self::Config(_) => None,
        }
    }

    /// Consumes the error and returns the attached diagnosis, if any.
    #[must_use]
    pub fn into_diagnosis(self) -> Option<Diagnosis> {
        match self {
            Self::Unhealthy(diagnosis) => Some(diagnosis),
            Self::Config(_) => None,
        }
    }

    /// Returns true if this is a fatal configuration error.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// TESTS
// ============================================================================
