//! Experience editor form: field schema, validation and state.
//!
//! [`schema`] enumerates every field with its default and rules; [`state`]
//! holds the string-typed values a text UI edits and converts them into an
//! [`crate::domain::Experience`] draft on submit.

pub mod schema;
pub mod state;

pub use schema::{check, spec, ArrayField, Field, FieldSpec, Rule, CURRENCIES};
pub use state::FormState;
