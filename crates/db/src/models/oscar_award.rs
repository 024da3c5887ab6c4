//! Oscar award entity model and DTOs.

use moviedb_core::oscar::OscarCategory;
use moviedb_core::types::{nullable, DbId};
use moviedb_core::validation::{OscarAwardCandidate, Violations};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `oscar_awards` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct OscarAward {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub category: OscarCategory,
    pub year: i32,
}

/// DTO for creating a new award. `category` is the identifier, e.g. `Best_Film`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOscarAward {
    pub category: Option<String>,
    pub year: Option<i32>,
}

/// DTO for updating an existing award. All fields are optional, but an
/// explicit `null` is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOscarAward {
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub year: Option<Option<i32>>,
}

impl CreateOscarAward {
    pub fn candidate(&self) -> OscarAwardCandidate {
        OscarAwardCandidate {
            category: self.category.clone(),
            year: self.year,
        }
    }
}

impl UpdateOscarAward {
    pub fn candidate(&self, existing: &OscarAward) -> OscarAwardCandidate {
        OscarAwardCandidate {
            category: Some(
                self.category
                    .clone()
                    .flatten()
                    .unwrap_or_else(|| existing.category.as_str().to_string()),
            ),
            year: Some(super::patch_value(self.year, existing.year)),
        }
    }

    pub fn null_violations(&self) -> Violations {
        super::null_violations(&[
            ("category", super::is_null(&self.category)),
            ("year", super::is_null(&self.year)),
        ])
    }
}
