//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for patches, where every field tells an
//!   absent key apart from an explicit `null`
//!
//! Required fields are `Option` in the create DTOs too, so a missing value
//! reaches the validation layer and is reported as a field violation.

pub mod genre;
pub mod movie;
pub mod oscar_award;
pub mod person;

use moviedb_core::validation::{FieldViolation, Violations};

/// Trim surrounding whitespace from a submitted text value.
fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Apply a text patch: an absent key or an explicit `null` keeps `stored`.
fn patch_text(patch: &Option<Option<String>>, stored: &str) -> String {
    match patch {
        Some(Some(value)) => value.trim().to_string(),
        _ => stored.to_string(),
    }
}

/// Apply a copyable patch: an absent key or an explicit `null` keeps `stored`.
fn patch_value<T: Copy>(patch: Option<Option<T>>, stored: T) -> T {
    patch.flatten().unwrap_or(stored)
}

/// One violation per field a patch explicitly set to `null`.
fn null_violations(fields: &[(&str, bool)]) -> Violations {
    let mut violations = Violations::new();
    for &(field, nulled) in fields {
        if nulled {
            violations.push(FieldViolation::null(field));
        }
    }
    violations
}

fn is_null<T>(patch: &Option<Option<T>>) -> bool {
    matches!(patch, Some(None))
}
