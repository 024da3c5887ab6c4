//! Movie entity model and DTOs.
//!
//! A movie has one required director, an optional oscar award (held by at
//! most one movie) and two many-to-many link sets kept in the
//! `movie_actors` and `movie_genres` junction tables.

use moviedb_core::types::{nullable, DbId, Timestamp};
use moviedb_core::validation::{MovieCandidate, Violations};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub created: Timestamp,
    pub director_id: DbId,
    pub oscar_award_id: Option<DbId>,
    pub animated: bool,
}

/// A movie together with the ids of its linked actors and genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieWithLinks {
    #[serde(flatten)]
    pub movie: Movie,
    pub actor_ids: Vec<DbId>,
    pub genre_ids: Vec<DbId>,
}

/// DTO for creating a new movie. Relations are given as raw ids.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMovie {
    pub title: Option<String>,
    pub director: Option<DbId>,
    #[serde(default)]
    pub actor: Vec<DbId>,
    #[serde(default)]
    pub genre: Vec<DbId>,
    pub oscar_award: Option<DbId>,
    #[serde(default)]
    pub animated: bool,
}

/// DTO for partially updating a movie.
///
/// Every field tells an absent key apart from `null`. A `null` award clears
/// it; a `null` on any other field is rejected. `actor` and `genre`, when
/// present, replace the whole link set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub director: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub actor: Option<Option<Vec<DbId>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub genre: Option<Option<Vec<DbId>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub oscar_award: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub animated: Option<Option<bool>>,
}

/// Drop repeated ids, keeping first occurrences in order.
fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

impl CreateMovie {
    pub fn new(title: &str, director: DbId) -> Self {
        Self {
            title: Some(title.to_string()),
            director: Some(director),
            ..Default::default()
        }
    }

    pub fn candidate(&self) -> MovieCandidate {
        MovieCandidate {
            title: super::trimmed(self.title.as_deref()),
            director: self.director,
            oscar_award: self.oscar_award,
            actor: dedup_ids(&self.actor),
            genre: dedup_ids(&self.genre),
            animated: self.animated,
        }
    }
}

impl UpdateMovie {
    /// Violations for fields explicitly set to `null`, other than the
    /// clearable award.
    pub fn null_violations(&self) -> Violations {
        super::null_violations(&[
            ("title", super::is_null(&self.title)),
            ("director", super::is_null(&self.director)),
            ("actor", super::is_null(&self.actor)),
            ("genre", super::is_null(&self.genre)),
            ("animated", super::is_null(&self.animated)),
        ])
    }

    /// The replacement actor set, if the payload carries one.
    pub fn actor_ids(&self) -> Option<&[DbId]> {
        self.actor.as_ref().and_then(|ids| ids.as_deref())
    }

    /// The replacement genre set, if the payload carries one.
    pub fn genre_ids(&self) -> Option<&[DbId]> {
        self.genre.as_ref().and_then(|ids| ids.as_deref())
    }

    /// Merge onto the stored movie. A nulled field keeps the stored value
    /// here; [`UpdateMovie::null_violations`] reports it separately.
    pub fn candidate(&self, existing: &MovieWithLinks) -> MovieCandidate {
        let movie = &existing.movie;
        MovieCandidate {
            title: Some(super::patch_text(&self.title, &movie.title)),
            director: Some(super::patch_value(self.director, movie.director_id)),
            oscar_award: self.oscar_award.unwrap_or(movie.oscar_award_id),
            actor: self
                .actor_ids()
                .map(dedup_ids)
                .unwrap_or_else(|| existing.actor_ids.clone()),
            genre: self
                .genre_ids()
                .map(dedup_ids)
                .unwrap_or_else(|| existing.genre_ids.clone()),
            animated: super::patch_value(self.animated, movie.animated),
        }
    }
}
