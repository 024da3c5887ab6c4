//! Entity registry and delete policies.
//!
//! Every stored entity kind is listed here together with the relations that
//! point at it. Deleting a record walks [`EntityKind::dependents`] and applies
//! each relation's [`OnDelete`] policy before the record itself is removed.
//! The schema declares foreign keys without any `ON DELETE` action, so a
//! relation missing from this table blocks the delete.

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// The five entity types held by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Genre,
    OscarAward,
    Actor,
    Director,
    Movie,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Genre,
        EntityKind::OscarAward,
        EntityKind::Actor,
        EntityKind::Director,
        EntityKind::Movie,
    ];

    /// Display name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Genre => "Genre",
            EntityKind::OscarAward => "OscarAward",
            EntityKind::Actor => "Actor",
            EntityKind::Director => "Director",
            EntityKind::Movie => "Movie",
        }
    }

    /// Backing table.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Genre => "genres",
            EntityKind::OscarAward => "oscar_awards",
            EntityKind::Actor => "actors",
            EntityKind::Director => "directors",
            EntityKind::Movie => "movies",
        }
    }

    /// Collection resource path, e.g. `/oscarAwards/`.
    pub fn collection_path(self) -> &'static str {
        match self {
            EntityKind::Genre => "/genres/",
            EntityKind::OscarAward => "/oscarAwards/",
            EntityKind::Actor => "/actors/",
            EntityKind::Director => "/directors/",
            EntityKind::Movie => "/movies/",
        }
    }

    /// Item resource path, e.g. `/movies/3/`.
    pub fn item_path(self, id: DbId) -> String {
        format!("{}{id}/", self.collection_path())
    }

    /// Relations referencing this kind and what happens to them on delete.
    pub fn dependents(self) -> &'static [Relation] {
        match self {
            EntityKind::Genre => GENRE_DEPENDENTS,
            EntityKind::OscarAward => OSCAR_AWARD_DEPENDENTS,
            EntityKind::Actor => ACTOR_DEPENDENTS,
            EntityKind::Director => DIRECTOR_DEPENDENTS,
            EntityKind::Movie => MOVIE_DEPENDENTS,
        }
    }
}

// ---------------------------------------------------------------------------
// Relations
// ---------------------------------------------------------------------------

/// What deleting a referenced record does to the rows referencing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Delete every referencing row as an entity of the given kind,
    /// applying that kind's own policies first.
    Cascade(EntityKind),
    /// Clear the referencing column, keeping the row.
    SetNull,
    /// Delete only the association rows in a junction table.
    Unlink,
}

/// A column in `table` that references some entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

/// Junction table linking movies to actors.
pub const MOVIE_ACTORS_TABLE: &str = "movie_actors";
/// Junction table linking movies to genres.
pub const MOVIE_GENRES_TABLE: &str = "movie_genres";

const GENRE_DEPENDENTS: &[Relation] = &[Relation {
    table: MOVIE_GENRES_TABLE,
    column: "genre_id",
    on_delete: OnDelete::Unlink,
}];

const OSCAR_AWARD_DEPENDENTS: &[Relation] = &[Relation {
    table: "movies",
    column: "oscar_award_id",
    on_delete: OnDelete::SetNull,
}];

const ACTOR_DEPENDENTS: &[Relation] = &[Relation {
    table: MOVIE_ACTORS_TABLE,
    column: "actor_id",
    on_delete: OnDelete::Unlink,
}];

const DIRECTOR_DEPENDENTS: &[Relation] = &[Relation {
    table: "movies",
    column: "director_id",
    on_delete: OnDelete::Cascade(EntityKind::Movie),
}];

const MOVIE_DEPENDENTS: &[Relation] = &[
    Relation {
        table: MOVIE_ACTORS_TABLE,
        column: "movie_id",
        on_delete: OnDelete::Unlink,
    },
    Relation {
        table: MOVIE_GENRES_TABLE,
        column: "movie_id",
        on_delete: OnDelete::Unlink,
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
