//! # validoctor
//!
//! Rule-composition and evaluation engine for validating arbitrary, deeply
//! nested payloads. Instead of binding validation to the data types, callers
//! compose rules into rule sets and examine a patient with them; the result
//! is a [`Diagnosis`](foundation::Diagnosis) listing every ailment found.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use validoctor::prelude::*;
//! use serde_json::json;
//!
//! let validity = MultiRule::structural("validity", [
//!     Binding::rule("name", not_blank()),
//!     Binding::each("reviewScores", in_range(1, 5)),
//! ]);
//!
//! let patient = json!({ "name": "Oats", "reviewScores": [1, 6, 3] });
//! let diagnosis = Validoctor::default().examine(&patient, [&validity])?;
//!
//! assert!(!diagnosis.is_valid());
//! assert_eq!(diagnosis.ailments()[0].field(), Some("reviewScores[1]"));
//! ```
//!
//! ## Building Blocks
//!
//! - [`Rule`](foundation::Rule): a predicate over one value plus an ailment template
//! - [`MultiRule`](combinators::MultiRule): ordered per-field bindings over a patient,
//!   nesting into sub-objects and collection elements
//! - [`ReducerRule`](combinators::ReducerRule): folds sibling fields into one value
//!   before testing it
//! - [`PropertyResolver`](foundation::PropertyResolver): how field names become values
//!   (structural, serde-reflective, or explicit accessors)
//!
//! ## Traits
//!
//! A [`Validoctor`](doctor::Validoctor) runs with two traits fixed at construction:
//!
//! - **pedantic** (default `true`): collect every ailment, or stop at the first one
//! - **exceptional** (default `false`): return an invalid diagnosis as
//!   [`ExamineError::Unhealthy`](foundation::ExamineError::Unhealthy) instead of `Ok`
//!
//! Rules that do not fit the patient (unknown fields, wrong value kinds) are
//! reported as [`ConfigError`](foundation::ConfigError) regardless of traits.

#![warn(missing_docs)]

pub mod combinators;
pub mod config;
pub mod doctor;
pub mod examiner;
pub mod foundation;
pub mod prelude;
pub mod rules;
