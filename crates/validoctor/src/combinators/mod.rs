//! Rule composition
//!
//! Combinators compose [`Rule`](crate::foundation::Rule)s into rule sets over
//! whole patients:
//!
//! - [`MultiRule`] - ordered per-field bindings, each optionally conditional
//! - [`Check`] - what a binding applies: a rule, a nested rule set, a
//!   per-element check, or a reducer
//! - [`ReducerRule`] - folds several sibling fields into one value and tests it
//!
//! Everything here is immutable once built and safe to share between threads
//! (wrap in [`Arc`](std::sync::Arc) to reuse a rule set across examinations).
//!
//! # Examples
//!
//! ```rust,ignore
//! use validoctor::combinators::{Binding, Check, MultiRule};
//! use validoctor::rules::{in_range, not_blank};
//!
//! let product = MultiRule::structural("product", [
//!     Binding::rule("name", not_blank()),
//!     Binding::each("reviewScores", in_range(1, 5)),
//! ]);
//! ```

pub mod check;
pub mod multi;
pub mod reducer;

pub use check::Check;
pub use multi::{Binding, MultiRule};
pub use reducer::{Reducer, ReducerRule};
