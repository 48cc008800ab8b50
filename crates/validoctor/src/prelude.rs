//! Prelude module for convenient imports.
//!
//! Provides a single `use validoctor::prelude::*;` import that brings in the
//! façade, the rule building blocks and the predefined rules.
//!
//! # Examples
//!
//! ```rust,ignore
//! use validoctor::prelude::*;
//!
//! let doctor = Validoctor::builder().pedantic(false).build();
//! let rules = MultiRule::structural("user", [Binding::rule("name", min_length(3))]);
//! ```

// ============================================================================
// FOUNDATION: Findings, rules, resolvers, errors
// ============================================================================

pub use crate::foundation::{
    AccessorResolver, Ailment, ConfigError, Diagnosis, ExamineError, PropertyResolver,
    ReflectiveResolver, Rule, Severity, ValueResolver,
};

// ============================================================================
// COMBINATORS: Rule sets and reducers
// ============================================================================

pub use crate::combinators::{Binding, Check, MultiRule, Reducer, ReducerRule};

// ============================================================================
// ENGINE: Façade, configuration, traversal
// ============================================================================

pub use crate::config::ValidoctorConfig;
pub use crate::doctor::{Validoctor, ValidoctorBuilder};
pub use crate::examiner::{Examine, Examiner, ExaminerState, Flow};

// ============================================================================
// RULES: Predefined catalog
// ============================================================================

pub use crate::rules::{
    at_least, at_most, in_range, matches, max_length, max_size, min_length, not_blank,
    not_empty, not_null, null, one_of,
};
