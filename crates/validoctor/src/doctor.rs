//! The [`Validoctor`] façade
//!
//! A `Validoctor` holds the pedantic and exceptional traits, fixed at
//! construction, and runs one fresh [`Examiner`] per call. Nothing is kept
//! between calls, so one instance can serve any number of threads.

use tracing::{debug, instrument, warn};

use crate::config::ValidoctorConfig;
use crate::examiner::{Examine, Examiner, Flow};
use crate::foundation::{ConfigError, Diagnosis, ExamineError};

// ============================================================================
// VALIDOCTOR
// ============================================================================

/// Examines patients against rules under a fixed pair of traits.
///
/// # Examples
///
/// ```rust,ignore
/// use validoctor::prelude::*;
///
/// let doctor = Validoctor::builder().pedantic(false).exceptional(true).build();
///
/// match doctor.examine(&patient, [&nullity, &validity]) {
///     Ok(diagnosis) => assert!(diagnosis.is_valid()),
///     Err(ExamineError::Unhealthy(diagnosis)) => respond_bad_request(&diagnosis),
///     Err(error) => return Err(error.into()),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validoctor {
    config: ValidoctorConfig,
}

impl Validoctor {
    /// Starts a builder with the default traits.
    #[must_use]
    pub fn builder() -> ValidoctorBuilder {
        ValidoctorBuilder::default()
    }

    /// Creates a doctor from a loaded configuration.
    #[must_use]
    pub const fn from_config(config: ValidoctorConfig) -> Self {
        Self { config }
    }

    /// The traits this doctor runs with.
    #[must_use]
    pub const fn config(&self) -> ValidoctorConfig {
        self.config
    }

    /// Whether every ailment is collected.
    #[must_use]
    pub const fn is_pedantic(&self) -> bool {
        self.config.pedantic
    }

    /// Whether an invalid diagnosis is returned as an error.
    #[must_use]
    pub const fn is_exceptional(&self) -> bool {
        self.config.exceptional
    }

    /// Examines `patient` with rules of one kind, in order.
    ///
    /// # Errors
    ///
    /// - [`ExamineError::Config`] when a rule does not fit the patient.
    /// - [`ExamineError::Unhealthy`] when the exceptional trait is set and the
    ///   diagnosis is invalid.
    #[instrument(
        level = "debug",
        name = "examine",
        skip_all,
        fields(pedantic = self.config.pedantic, exceptional = self.config.exceptional)
    )]
    pub fn examine<'r, T, R, I>(&self, patient: &T, rules: I) -> Result<Diagnosis, ExamineError>
    where
        R: Examine<T> + ?Sized + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        let mut examiner = Examiner::new(self.config.pedantic);
        for rule in rules {
            if step(&mut examiner, patient, rule)?.is_break() {
                break;
            }
        }
        self.conclude(examiner)
    }

    /// Examines `patient` with rules of mixed kinds, in order.
    ///
    /// # Errors
    ///
    /// Same as [`examine`](Self::examine).
    pub fn examine_combo<T>(
        &self,
        patient: &T,
        rules: &[&dyn Examine<T>],
    ) -> Result<Diagnosis, ExamineError> {
        self.examine(patient, rules.iter().copied())
    }

    fn conclude(&self, examiner: Examiner) -> Result<Diagnosis, ExamineError> {
        let diagnosis = examiner.into_diagnosis();
        debug!(
            valid = diagnosis.is_valid(),
            ailments = diagnosis.len(),
            "examination finished"
        );

        if self.config.exceptional && !diagnosis.is_valid() {
            Err(ExamineError::Unhealthy(diagnosis))
        } else {
            Ok(diagnosis)
        }
    }
}

impl From<ValidoctorConfig> for Validoctor {
    fn from(config: ValidoctorConfig) -> Self {
        Self::from_config(config)
    }
}

fn step<T, R>(examiner: &mut Examiner, patient: &T, rule: &R) -> Result<Flow, ConfigError>
where
    R: Examine<T> + ?Sized,
{
    examiner.examine(patient, rule).inspect_err(|error| {
        warn!(rule = rule.label(), %error, "examination aborted by configuration error");
    })
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Validoctor`]. Unset traits keep their defaults
/// (`pedantic = true`, `exceptional = false`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidoctorBuilder {
    config: ValidoctorConfig,
}

impl ValidoctorBuilder {
    /// Sets the pedantic trait.
    #[must_use = "builder methods must be chained or built"]
    pub const fn pedantic(mut self, pedantic: bool) -> Self {
        self.config.pedantic = pedantic;
        self
    }

    /// Sets the exceptional trait.
    #[must_use = "builder methods must be chained or built"]
    pub const fn exceptional(mut self, exceptional: bool) -> Self {
        self.config.exceptional = exceptional;
        self
    }

    /// Builds the doctor.
    #[must_use]
    pub const fn build(self) -> Validoctor {
        Validoctor::from_config(self.config)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{Binding, MultiRule};
    use crate::foundation::Rule;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn rules() -> MultiRule<Value> {
        MultiRule::structural(
            "pair",
            [
                Binding::rule("a", Rule::new("A_MISSING", |v| !v.is_null())),
                Binding::rule("b", Rule::new("B_MISSING", |v| !v.is_null())),
            ],
        )
    }

    #[test]
    fn test_builder_defaults() {
        let doctor = Validoctor::builder().build();
        assert!(doctor.is_pedantic());
        assert!(!doctor.is_exceptional());
        assert_eq!(doctor, Validoctor::default());
    }

    #[test]
    fn test_builder_sets_traits() {
        let doctor = Validoctor::builder().pedantic(false).exceptional(true).build();
        assert_eq!(doctor.config(), ValidoctorConfig::strict());
        assert_eq!(Validoctor::from(ValidoctorConfig::strict()), doctor);
    }

    #[test]
    fn test_pedantic_and_non_pedantic() {
        let patient = json!({ "a": null, "b": null });

        let all = Validoctor::default().examine(&patient, [&rules()]).unwrap();
        assert_eq!(all.len(), 2);

        let first = Validoctor::builder()
            .pedantic(false)
            .build()
            .examine(&patient, [&rules()])
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.ailments()[0].name(), "A_MISSING");
    }

    #[test]
    fn test_exceptional_raises_only_when_invalid() {
        let doctor = Validoctor::builder().exceptional(true).build();

        let healthy = doctor.examine(&json!({ "a": 1, "b": 2 }), [&rules()]);
        assert!(healthy.unwrap().is_valid());

        let err = doctor
            .examine(&json!({ "a": 1, "b": null }), [&rules()])
            .unwrap_err();
        assert_eq!(err.diagnosis().map(Diagnosis::len), Some(1));
    }

    #[test]
    fn test_warnings_do_not_raise() {
        let doctor = Validoctor::builder().exceptional(true).build();
        let soft = Rule::new("SOFT", |_| false).warn();

        let diagnosis = doctor.examine(&json!(1), [&soft]).unwrap();
        assert!(diagnosis.is_valid());
        assert_eq!(diagnosis.warnings().count(), 1);
    }

    #[test]
    fn test_config_errors_ignore_traits() {
        let doctor = Validoctor::builder().pedantic(false).exceptional(true).build();
        let err = doctor.examine(&json!({ "a": 1 }), [&rules()]).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_combo_mixes_kinds() {
        let whole = Rule::new("NOT_OBJECT", |v| v.is_object());
        let multi = rules();
        let diagnosis = Validoctor::default()
            .examine_combo(&json!({ "a": null, "b": 1 }), &[&whole, &multi])
            .unwrap();
        let names: Vec<_> = diagnosis.ailments().iter().map(|a| a.name()).collect();
        assert_eq!(names, ["A_MISSING"]);
    }
}
