//! Read representations returned by the API.
//!
//! Writes take raw ids; reads render every relation as a [`ResourceRef`]
//! so clients can follow it. Reverse relations (`plays`, `directs`,
//! `movie_genre`) are supplied by the handlers from live link state.

use std::collections::BTreeMap;

use moviedb_core::catalog::EntityKind;
use moviedb_core::oscar::OscarCategory;
use moviedb_core::person::PersonKind;
use moviedb_core::types::{DbId, Timestamp};
use moviedb_db::models::genre::Genre;
use moviedb_db::models::movie::MovieWithLinks;
use moviedb_db::models::oscar_award::OscarAward;
use moviedb_db::models::person::Person;
use serde::Serialize;

/// A resolvable pointer to another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    pub id: DbId,
    pub url: String,
}

impl ResourceRef {
    pub fn new(kind: EntityKind, id: DbId) -> Self {
        Self {
            id,
            url: kind.item_path(id),
        }
    }

    pub fn many(kind: EntityKind, ids: &[DbId]) -> Vec<Self> {
        ids.iter().map(|&id| Self::new(kind, id)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct GenreView {
    pub id: DbId,
    pub url: String,
    pub name: String,
    pub movie_genre: Vec<ResourceRef>,
}

impl GenreView {
    pub fn new(genre: Genre, movie_ids: &[DbId]) -> Self {
        Self {
            id: genre.id,
            url: EntityKind::Genre.item_path(genre.id),
            name: genre.name,
            movie_genre: ResourceRef::many(EntityKind::Movie, movie_ids),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OscarAwardView {
    pub id: DbId,
    pub url: String,
    /// Identifier form, e.g. `Best_Film`.
    pub category: OscarCategory,
    /// Human label, e.g. `Best Film`.
    pub category_display: &'static str,
    pub year: i32,
}

impl From<OscarAward> for OscarAwardView {
    fn from(award: OscarAward) -> Self {
        Self {
            id: award.id,
            url: EntityKind::OscarAward.item_path(award.id),
            category: award.category,
            category_display: award.category.label(),
            year: award.year,
        }
    }
}

/// An actor or director. The movie list renders as `plays` or `directs`
/// depending on the kind.
#[derive(Debug, Serialize)]
pub struct PersonView {
    pub id: DbId,
    pub url: String,
    pub name: String,
    pub surname: String,
    pub created: Timestamp,
    #[serde(flatten)]
    pub movies: BTreeMap<&'static str, Vec<ResourceRef>>,
}

impl PersonView {
    pub fn new(kind: PersonKind, person: Person, movie_ids: &[DbId]) -> Self {
        let movies = BTreeMap::from([(
            kind.movies_field(),
            ResourceRef::many(EntityKind::Movie, movie_ids),
        )]);
        Self {
            id: person.id,
            url: kind.entity().item_path(person.id),
            name: person.name,
            surname: person.surname,
            created: person.created,
            movies,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieView {
    pub id: DbId,
    pub url: String,
    pub title: String,
    pub created: Timestamp,
    pub director: ResourceRef,
    pub actor: Vec<ResourceRef>,
    pub genre: Vec<ResourceRef>,
    pub oscar_award: Option<ResourceRef>,
    pub animated: bool,
}

impl From<MovieWithLinks> for MovieView {
    fn from(linked: MovieWithLinks) -> Self {
        let movie = linked.movie;
        Self {
            id: movie.id,
            url: EntityKind::Movie.item_path(movie.id),
            title: movie.title,
            created: movie.created,
            director: ResourceRef::new(EntityKind::Director, movie.director_id),
            actor: ResourceRef::many(EntityKind::Actor, &linked.actor_ids),
            genre: ResourceRef::many(EntityKind::Genre, &linked.genre_ids),
            oscar_award: movie
                .oscar_award_id
                .map(|id| ResourceRef::new(EntityKind::OscarAward, id)),
            animated: movie.animated,
        }
    }
}
