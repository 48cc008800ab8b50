//! Foundation types
//!
//! The building blocks every examination is made of:
//!
//! - **Findings**: [`Ailment`], [`Severity`], [`Diagnosis`]
//! - **Checks**: [`Rule`], the atomic predicate-plus-template
//! - **Resolution**: [`PropertyResolver`] and its strategies
//! - **Errors**: [`ConfigError`], [`ExamineError`]
//!
//! # Architecture
//!
//! ## 1. Findings are data
//!
//! A failed rule never raises. It produces an [`Ailment`] that is collected
//! into a [`Diagnosis`], which serializes directly into an API error body:
//!
//! ```rust,ignore
//! let ailment = Ailment::new("STRING_TOO_SHORT", Severity::Error)
//!     .with_field("name")
//!     .with_param("min", 3)
//!     .with_invalid_value("ab");
//! ```
//!
//! ## 2. Misconfiguration is fatal
//!
//! Rules that do not fit the patient (an unknown field, a string rule on a
//! number) produce a [`ConfigError`] that aborts the examination.
//!
//! ## 3. Rules only see values
//!
//! A [`Rule`] tests a single [`serde_json::Value`]; how that value is pulled
//! out of a patient is the resolver's job.

pub mod ailment;
pub mod diagnosis;
pub mod error;
pub mod resolver;
pub mod rule;

pub use ailment::{Ailment, Severity};
pub use diagnosis::Diagnosis;
pub use error::{ConfigError, ExamineError};
pub use resolver::{AccessorResolver, PropertyResolver, ReflectiveResolver, ValueResolver};
pub use rule::Rule;
