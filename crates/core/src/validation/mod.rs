//! Validation layer.
//!
//! Inspects candidate records and reports field-level violations. Never
//! mutates or persists anything.

pub mod records;
pub mod rules;

pub use records::{GenreCandidate, MovieCandidate, OscarAwardCandidate, PersonCandidate};
pub use rules::{FieldViolation, Violations, NON_FIELD_ERRORS};
