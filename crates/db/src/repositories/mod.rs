//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument. Writes run inside a transaction
//! that also performs the uniqueness and reference checks.

pub mod genre_repo;
pub mod movie_repo;
pub mod oscar_award_repo;
pub mod person_repo;

mod integrity;

pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use oscar_award_repo::OscarAwardRepo;
pub use person_repo::PersonRepo;
