//! The shared shape of actors and directors.
//!
//! Both are a name/surname pair with a creation timestamp. They stay
//! distinct entity kinds with their own id spaces and their own uniqueness
//! domain; [`PersonKind`] is the tag that tells them apart wherever the
//! shape is handled generically.

use crate::catalog::EntityKind;

pub trait HasName {
    fn name(&self) -> &str;
}

pub trait HasSurname {
    fn surname(&self) -> &str;
}

/// `"Name Surname"`, for log lines.
pub fn full_name<P: HasName + HasSurname>(person: &P) -> String {
    format!("{} {}", person.name(), person.surname())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonKind {
    Actor,
    Director,
}

impl PersonKind {
    pub fn entity(self) -> EntityKind {
        match self {
            PersonKind::Actor => EntityKind::Actor,
            PersonKind::Director => EntityKind::Director,
        }
    }

    /// Name of the read-only reverse relation listing this person's movies.
    pub fn movies_field(self) -> &'static str {
        match self {
            PersonKind::Actor => "plays",
            PersonKind::Director => "directs",
        }
    }
}
