//! Per-entity candidate records.
//!
//! A candidate is the full set of values a record would have after a create
//! or after merging a partial update onto the stored row. Only checks that
//! need no database live here (presence, length, range, choice); uniqueness
//! and reference existence are checked by the store against the other rows.

use validator::Validate;

use super::rules::{FieldViolation, Violations};
use crate::oscar::OscarCategory;
use crate::types::DbId;

/// Run the derived `validator` rules and collect the failures.
fn violations_of<T: Validate>(candidate: &T) -> Violations {
    match candidate.validate() {
        Ok(()) => Violations::new(),
        Err(errors) => errors.into(),
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct GenreCandidate {
    #[validate(required, length(min = 1, max = 10))]
    pub name: Option<String>,
}

impl GenreCandidate {
    pub fn violations(&self) -> Violations {
        violations_of(self)
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct OscarAwardCandidate {
    /// Raw category identifier, parsed by [`OscarAwardCandidate::category`].
    #[validate(required)]
    pub category: Option<String>,
    #[validate(required, range(min = 1929, max = 2016))]
    pub year: Option<i32>,
}

impl OscarAwardCandidate {
    pub fn violations(&self) -> Violations {
        let mut violations = violations_of(self);
        if let Some(raw) = &self.category {
            if let Err(err) = raw.parse::<OscarCategory>() {
                violations.push(FieldViolation::new("category", "choice", err.to_string()));
            }
        }
        violations
    }

    /// The parsed category, if present and known.
    pub fn category(&self) -> Option<OscarCategory> {
        self.category.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Candidate shared by actors and directors.
#[derive(Debug, Clone, Default, Validate)]
pub struct PersonCandidate {
    #[validate(required, length(min = 1, max = 20))]
    pub name: Option<String>,
    #[validate(required, length(min = 1, max = 40))]
    pub surname: Option<String>,
}

impl PersonCandidate {
    pub fn violations(&self) -> Violations {
        violations_of(self)
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct MovieCandidate {
    #[validate(required, length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(required)]
    pub director: Option<DbId>,
    pub oscar_award: Option<DbId>,
    pub actor: Vec<DbId>,
    pub genre: Vec<DbId>,
    pub animated: bool,
}

impl MovieCandidate {
    pub fn violations(&self) -> Violations {
        violations_of(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
