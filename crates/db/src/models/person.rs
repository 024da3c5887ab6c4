//! Person model shared by actors and directors.
//!
//! Both kinds are stored in their own table with the same columns; the
//! repository takes a [`PersonKind`](moviedb_core::person::PersonKind) to pick
//! the table.

use moviedb_core::person::{HasName, HasSurname};
use moviedb_core::types::{nullable, DbId, Timestamp};
use moviedb_core::validation::{PersonCandidate, Violations};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `actors` or `directors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub surname: String,
    /// Set once on insert, never updated.
    pub created: Timestamp,
}

impl HasName for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasSurname for Person {
    fn surname(&self) -> &str {
        &self.surname
    }
}

/// DTO for creating an actor or director.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePerson {
    pub name: Option<String>,
    pub surname: Option<String>,
}

/// DTO for updating an actor or director. `created` is not accepted and
/// an explicit `null` is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePerson {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub surname: Option<Option<String>>,
}

impl CreatePerson {
    pub fn new(name: &str, surname: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            surname: Some(surname.to_string()),
        }
    }

    pub fn candidate(&self) -> PersonCandidate {
        PersonCandidate {
            name: super::trimmed(self.name.as_deref()),
            surname: super::trimmed(self.surname.as_deref()),
        }
    }
}

impl UpdatePerson {
    pub fn candidate(&self, existing: &Person) -> PersonCandidate {
        PersonCandidate {
            name: Some(super::patch_text(&self.name, existing.name())),
            surname: Some(super::patch_text(&self.surname, existing.surname())),
        }
    }

    pub fn null_violations(&self) -> Violations {
        super::null_violations(&[
            ("name", super::is_null(&self.name)),
            ("surname", super::is_null(&self.surname)),
        ])
    }
}
