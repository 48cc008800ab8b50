//! The report produced by one examination.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::{Ailment, Severity};

/// Aggregate result of an examination: every recorded ailment plus validity.
///
/// `valid` is derived on construction and is true iff no ailment has
/// [`Severity::Error`]. A diagnosis holding only warnings is valid.
///
/// Serializes as `{ "valid": bool, "ailments": [...] }`, directly usable as
/// an API error body. Deserializing recomputes `valid` from the ailments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDiagnosis")]
pub struct Diagnosis {
    valid: bool,
    ailments: Vec<Ailment>,
}

#[derive(Deserialize)]
struct RawDiagnosis {
    #[serde(default)]
    ailments: Vec<Ailment>,
}

impl From<RawDiagnosis> for Diagnosis {
    fn from(raw: RawDiagnosis) -> Self {
        Self::new(raw.ailments)
    }
}

impl Diagnosis {
    /// Builds a diagnosis, deriving validity from the ailments.
    #[must_use]
    pub fn new(ailments: Vec<Ailment>) -> Self {
        let valid = !ailments.iter().any(|a| a.severity().is_error());
        Self { valid, ailments }
    }

    /// A diagnosis with no ailments.
    #[must_use]
    pub fn healthy() -> Self {
        Self::new(Vec::new())
    }

    /// Returns true if no error-severity ailment was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// All ailments in traversal order.
    #[must_use]
    pub fn ailments(&self) -> &[Ailment] {
        &self.ailments
    }

    /// Consumes the diagnosis and returns its ailments.
    #[must_use]
    pub fn into_ailments(self) -> Vec<Ailment> {
        self.ailments
    }

    /// Ailments with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &Ailment> {
        self.ailments.iter().filter(|a| a.severity() == Severity::Error)
    }

    /// Ailments with [`Severity::Warn`].
    pub fn warnings(&self) -> impl Iterator<Item = &Ailment> {
        self.ailments.iter().filter(|a| a.severity() == Severity::Warn)
    }

    /// Number of ailments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ailments.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ailments.is_empty()
    }
}

impl Default for Diagnosis {
    fn default() -> Self {
        Self::healthy()
    }
}

impl FromIterator<Ailment> for Diagnosis {
    fn from_iter<I: IntoIterator<Item = Ailment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.valid { "valid" } else { "invalid" };
        write!(f, "{verdict} with {} ailment(s)", self.ailments.len())?;
        for (i, ailment) in self.ailments.iter().enumerate() {
            write!(f, "\n  {}. {ailment}", i + 1)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
