//! Genre entity model and DTOs.

use moviedb_core::types::{nullable, DbId};
use moviedb_core::validation::{GenreCandidate, Violations};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a new genre.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGenre {
    pub name: Option<String>,
}

/// DTO for updating an existing genre. An explicit `null` is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGenre {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
}

impl CreateGenre {
    pub fn candidate(&self) -> GenreCandidate {
        GenreCandidate {
            name: super::trimmed(self.name.as_deref()),
        }
    }
}

impl UpdateGenre {
    /// Merge onto the stored row.
    pub fn candidate(&self, existing: &Genre) -> GenreCandidate {
        GenreCandidate {
            name: Some(super::patch_text(&self.name, &existing.name)),
        }
    }

    pub fn null_violations(&self) -> Violations {
        super::null_violations(&[("name", super::is_null(&self.name))])
    }
}
