//! The traversal and aggregation engine
//!
//! An [`Examiner`] walks any mix of rules, rule sets and reducer rules over
//! one patient and collects ailments. It is the explicit context of a single
//! examination: the pedantic trait, the ailment accumulator and the current
//! location all live here, never in shared state, so independent examinations
//! can run concurrently against the same rule definitions.
//!
//! Every step returns `Result<Flow, ConfigError>`:
//!
//! - `Err` is a fatal configuration error and aborts the walk.
//! - `Ok(Flow::Break(()))` means a non-pedantic examination found its first
//!   ailment and everything not yet visited is skipped.
//! - `Ok(Flow::Continue(()))` keeps going.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::combinators::{Binding, Check, MultiRule, ReducerRule};
use crate::foundation::error::kind_of;
use crate::foundation::{Ailment, ConfigError, Diagnosis, Rule};

/// Whether the walk goes on after a step.
pub type Flow = ControlFlow<()>;

const ROOT: &str = "<patient>";

// ============================================================================
// EXAMINE TRAIT
// ============================================================================

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::foundation::Rule {}
    impl<T> Sealed for crate::combinators::MultiRule<T> {}
    impl<T> Sealed for crate::combinators::ReducerRule<T> {}
    impl<R: Sealed + ?Sized> Sealed for std::sync::Arc<R> {}
}

/// Anything that can be examined against a patient of type `T`.
///
/// Implemented by [`Rule`] (tests the whole patient), [`MultiRule`] and
/// [`ReducerRule`]. Sealed; mixed kinds are passed as `&dyn Examine<T>`.
pub trait Examine<T>: sealed::Sealed + Send + Sync {
    /// Name used in logs and error context.
    fn label(&self) -> &str;

    /// Runs this rule inside `examiner`.
    #[doc(hidden)]
    fn examine_with(&self, patient: &T, examiner: &mut Examiner) -> Result<Flow, ConfigError>;
}

impl<T: Serialize> Examine<T> for Rule {
    fn label(&self) -> &str {
        self.name()
    }

    fn examine_with(&self, patient: &T, examiner: &mut Examiner) -> Result<Flow, ConfigError> {
        let value = serde_json::to_value(patient)?;
        examiner.apply_rule(self, &value)
    }
}

impl<T> Examine<T> for MultiRule<T> {
    fn label(&self) -> &str {
        self.name()
    }

    fn examine_with(&self, patient: &T, examiner: &mut Examiner) -> Result<Flow, ConfigError> {
        examiner.visit_multi(self, patient)
    }
}

impl<T> Examine<T> for ReducerRule<T> {
    fn label(&self) -> &str {
        self.name()
    }

    fn examine_with(&self, patient: &T, examiner: &mut Examiner) -> Result<Flow, ConfigError> {
        examiner.apply_reducer(self, patient)
    }
}

impl<T, R> Examine<T> for Arc<R>
where
    R: Examine<T> + ?Sized,
{
    fn label(&self) -> &str {
        (**self).label()
    }

    fn examine_with(&self, patient: &T, examiner: &mut Examiner) -> Result<Flow, ConfigError> {
        (**self).examine_with(patient, examiner)
    }
}

// ============================================================================
// EXAMINER
// ============================================================================

/// Lifecycle of an examination. A fatal error is not a state: it is returned
/// as `Err` and the examiner is dropped with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExaminerState {
    /// Still visiting rules.
    Running,
    /// Short-circuited on the first ailment of a non-pedantic examination.
    Done,
}

#[derive(Debug, Clone)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Traversal context of one examination.
///
/// # Examples
///
/// ```rust,ignore
/// use validoctor::examiner::Examiner;
///
/// let mut examiner = Examiner::new(true);
/// examiner.examine(&patient, &validity)?;
/// examiner.examine(&patient, &nullity)?;
/// let diagnosis = examiner.into_diagnosis();
/// ```
#[derive(Debug, Clone)]
pub struct Examiner {
    pedantic: bool,
    state: ExaminerState,
    ailments: Vec<Ailment>,
    path: Vec<Segment>,
}

impl Examiner {
    /// Creates an examiner. A pedantic one visits every applicable binding;
    /// otherwise it stops at the first ailment.
    #[must_use]
    pub fn new(pedantic: bool) -> Self {
        Self {
            pedantic,
            state: ExaminerState::Running,
            ailments: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ExaminerState {
        self.state
    }

    /// Whether every violation is collected.
    #[must_use]
    pub fn is_pedantic(&self) -> bool {
        self.pedantic
    }

    /// Ailments recorded so far, in traversal order.
    #[must_use]
    pub fn ailments(&self) -> &[Ailment] {
        &self.ailments
    }

    /// Examines `patient` with `rule`, adding to the ailments recorded so far.
    ///
    /// Does nothing once the examiner is [`ExaminerState::Done`].
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised while resolving fields or running rules.
    pub fn examine<T, R>(&mut self, patient: &T, rule: &R) -> Result<Flow, ConfigError>
    where
        R: Examine<T> + ?Sized,
    {
        if self.state == ExaminerState::Done {
            return Ok(ControlFlow::Break(()));
        }
        rule.examine_with(patient, self)
    }

    /// Finishes the examination.
    #[must_use]
    pub fn into_diagnosis(self) -> Diagnosis {
        Diagnosis::new(self.ailments)
    }

    // ------------------------------------------------------------------------
    // Leaves
    // ------------------------------------------------------------------------

    fn apply_rule(&mut self, rule: &Rule, value: &Value) -> Result<Flow, ConfigError> {
        match rule.evaluate(value) {
            Ok(Some(ailment)) => Ok(self.record(ailment)),
            Ok(None) => Ok(ControlFlow::Continue(())),
            Err(source) => Err(self.in_rule(rule.name(), source)),
        }
    }

    fn apply_reducer<T>(
        &mut self,
        reducer: &ReducerRule<T>,
        patient: &T,
    ) -> Result<Flow, ConfigError> {
        match reducer.evaluate(patient) {
            Ok(Some(ailment)) => Ok(self.record(ailment)),
            Ok(None) => Ok(ControlFlow::Continue(())),
            Err(source) => Err(self.in_rule(reducer.name(), source)),
        }
    }

    fn record(&mut self, ailment: Ailment) -> Flow {
        let ailment = match self.location() {
            Some(field) => ailment.with_field(field),
            None => ailment,
        };
        trace!(ailment = %ailment, "ailment recorded");
        self.ailments.push(ailment);

        if self.pedantic {
            ControlFlow::Continue(())
        } else {
            debug!(
                field = self.location().as_deref().unwrap_or(ROOT),
                "first ailment found, skipping remaining rules"
            );
            self.state = ExaminerState::Done;
            ControlFlow::Break(())
        }
    }

    // ------------------------------------------------------------------------
    // Composites
    // ------------------------------------------------------------------------

    fn visit_multi<T>(&mut self, multi: &MultiRule<T>, patient: &T) -> Result<Flow, ConfigError> {
        for binding in multi.bindings() {
            if !binding.applies_to(patient) {
                trace!(rule = multi.name(), field = binding.field(), "binding skipped");
                continue;
            }
            trace!(
                rule = multi.name(),
                field = binding.field(),
                kind = binding.check().kind(),
                "visiting binding"
            );

            self.path.push(Segment::Field(binding.field().to_owned()));
            let flow = self.visit_binding(multi, binding, patient);
            self.path.pop();

            if flow?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn visit_binding<T>(
        &mut self,
        multi: &MultiRule<T>,
        binding: &Binding<T>,
        patient: &T,
    ) -> Result<Flow, ConfigError> {
        if let Check::Reduce(reducer) = binding.check() {
            return self.apply_reducer(reducer, patient);
        }
        let value = multi
            .resolve(patient, binding.field())
            .map_err(|source| self.within(source))?;
        self.visit_check(binding.check(), patient, &value)
    }

    /// Single dispatch point over every check kind.
    fn visit_check<T>(
        &mut self,
        check: &Check<T>,
        patient: &T,
        value: &Value,
    ) -> Result<Flow, ConfigError> {
        match check {
            Check::Rule(rule) => self.apply_rule(rule, value),
            Check::Nested(_) | Check::ForElements(_) if value.is_null() => {
                trace!(
                    field = self.location().as_deref().unwrap_or(ROOT),
                    "absent, not descending"
                );
                Ok(ControlFlow::Continue(()))
            }
            Check::Nested(multi) => self.visit_multi(multi, value),
            Check::ForElements(inner) => self.visit_elements(inner, value),
            Check::Reduce(reducer) => self.apply_reducer(reducer, patient),
        }
    }

    fn visit_elements(&mut self, inner: &Check<Value>, value: &Value) -> Result<Flow, ConfigError> {
        let Value::Array(elements) = value else {
            return Err(ConfigError::NotACollection {
                field: self.location().unwrap_or_else(|| ROOT.to_owned()),
                actual: kind_of(value),
            });
        };

        for (index, element) in elements.iter().enumerate() {
            self.path.push(Segment::Index(index));
            let flow = self.visit_check(inner, element, element);
            self.path.pop();

            if flow?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    // ------------------------------------------------------------------------
    // Location
    // ------------------------------------------------------------------------

    fn location(&self) -> Option<String> {
        (!self.path.is_empty()).then(|| render(&self.path))
    }

    fn in_rule(&self, rule: &str, source: ConfigError) -> ConfigError {
        ConfigError::InRule {
            rule: rule.to_owned(),
            field: self.location().unwrap_or_else(|| ROOT.to_owned()),
            source: Box::new(source),
        }
    }

    /// Resolution errors deeper than the root name the nested patient.
    fn within(&self, source: ConfigError) -> ConfigError {
        let parent = &self.path[..self.path.len().saturating_sub(1)];
        if parent.is_empty() {
            source
        } else {
            ConfigError::Within {
                path: render(parent),
                source: Box::new(source),
            }
        }
    }
}

fn render(path: &[Segment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            Segment::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            Segment::Index(index) => out.push_str(&format!("[{index}]")),
        }
    }
    out
}

impl fmt::Display for ExaminerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Done => "done",
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::Reducer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn not_blank() -> Rule {
        Rule::typed("STRING_EMPTY", |s: &String| !s.trim().is_empty())
    }

    fn score() -> Rule {
        Rule::typed("NUMBER_OUT_OF_RANGE", |n: &f64| (1.0..=5.0).contains(n))
            .with_param("min", 1)
            .with_param("max", 5)
    }

    fn fields(examiner: &Examiner) -> Vec<Option<&str>> {
        examiner.ailments().iter().map(Ailment::field).collect()
    }

    fn product_rules() -> MultiRule<Value> {
        let facts = MultiRule::structural("facts", [Binding::rule("label", not_blank())]);
        MultiRule::structural(
            "product",
            [
                Binding::rule("name", not_blank()),
                Binding::nested("facts", facts),
                Binding::each("reviewScores", score()),
            ],
        )
    }

    #[test]
    fn test_pedantic_collects_in_traversal_order() {
        let patient = json!({
            "name": " ",
            "facts": { "label": "" },
            "reviewScores": [0, 3, 9]
        });
        let mut examiner = Examiner::new(true);

        let flow = examiner.examine(&patient, &product_rules()).unwrap();

        assert!(flow.is_continue());
        assert_eq!(examiner.state(), ExaminerState::Running);
        assert_eq!(
            fields(&examiner),
            [
                Some("name"),
                Some("facts.label"),
                Some("reviewScores[0]"),
                Some("reviewScores[2]")
            ]
        );
    }

    #[test]
    fn test_non_pedantic_stops_at_first() {
        let patient = json!({
            "name": "ok",
            "facts": { "label": "" },
            "reviewScores": [9]
        });
        let mut examiner = Examiner::new(false);

        let flow = examiner.examine(&patient, &product_rules()).unwrap();

        assert!(flow.is_break());
        assert_eq!(examiner.state(), ExaminerState::Done);
        assert_eq!(fields(&examiner), [Some("facts.label")]);

        // a finished examiner ignores further rules
        examiner.examine(&patient, &product_rules()).unwrap();
        assert_eq!(examiner.ailments().len(), 1);
    }

    #[test]
    fn test_null_nested_and_collection_are_skipped() {
        let patient = json!({ "name": "Oats", "facts": null, "reviewScores": null });
        let mut examiner = Examiner::new(true);

        examiner.examine(&patient, &product_rules()).unwrap();

        assert!(examiner.into_diagnosis().is_empty());
    }

    #[test]
    fn test_elements_must_be_a_collection() {
        let patient = json!({ "name": "Oats", "facts": null, "reviewScores": 4 });
        let err = Examiner::new(true)
            .examine(&patient, &product_rules())
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::NotACollection { ref field, actual: "a number" } if field == "reviewScores"
        ));
    }

    #[test]
    fn test_nested_resolution_error_names_parent() {
        let patient = json!({ "name": "Oats", "facts": { "kcal": 1 }, "reviewScores": [] });
        let err = Examiner::new(true)
            .examine(&patient, &product_rules())
            .unwrap_err();

        assert!(matches!(err, ConfigError::Within { ref path, .. } if path == "facts"));
        assert!(matches!(err.root_cause(), ConfigError::UnknownField { field } if field == "label"));
    }

    #[test]
    fn test_rule_errors_carry_rule_and_location() {
        let patient = json!({ "name": 42, "facts": null, "reviewScores": [] });
        let err = Examiner::new(true)
            .examine(&patient, &product_rules())
            .unwrap_err();

        match err {
            ConfigError::InRule { rule, field, source } => {
                assert_eq!(rule, "STRING_EMPTY");
                assert_eq!(field, "name");
                assert!(matches!(*source, ConfigError::TypeMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_conditional_binding_is_not_resolved_when_skipped() {
        let rules = MultiRule::structural(
            "conditional",
            [Binding::rule("does.not.exist", not_blank()).when(|_: &Value| false)],
        );
        let mut examiner = Examiner::new(true);

        examiner.examine(&json!({}), &rules).unwrap();
        assert!(examiner.ailments().is_empty());
    }

    #[test]
    fn test_each_over_nested_rule_sets() {
        let item = MultiRule::structural("item", [Binding::rule("sku", not_blank())]);
        let order = MultiRule::structural("order", [Binding::each("items", item)]);
        let patient = json!({ "items": [{ "sku": "a" }, { "sku": "" }, { "sku": " " }] });
        let mut examiner = Examiner::new(true);

        examiner.examine(&patient, &order).unwrap();

        assert_eq!(fields(&examiner), [Some("items[1].sku"), Some("items[2].sku")]);
    }

    #[test]
    fn test_reducer_binding_reports_under_its_name() {
        let reducer = ReducerRule::structural(
            "SINGLE_CONTACT",
            ["email", "phone"],
            Reducer::count_present(),
            Rule::typed("TOO_MANY_SET", |n: &u64| *n <= 1),
        )
        .unwrap();
        let user = MultiRule::structural("user", [Binding::reduce(reducer)]);
        let mut examiner = Examiner::new(true);

        examiner
            .examine(&json!({ "email": "a@b.c", "phone": "555" }), &user)
            .unwrap();

        assert_eq!(fields(&examiner), [Some("SINGLE_CONTACT")]);
        assert_eq!(examiner.ailments()[0].invalid_value(), Some(&json!(2)));
    }

    #[test]
    fn test_whole_patient_rule_has_no_field() {
        let mut examiner = Examiner::new(true);
        examiner.examine(&"   ".to_owned(), &not_blank()).unwrap();

        assert_eq!(fields(&examiner), [None]);
    }

    #[test]
    fn test_render_paths() {
        let path = [
            Segment::Field("orders".to_owned()),
            Segment::Index(3),
            Segment::Field("lines".to_owned()),
            Segment::Index(0),
            Segment::Field("sku".to_owned()),
        ];
        assert_eq!(render(&path), "orders[3].lines[0].sku");
    }
}
