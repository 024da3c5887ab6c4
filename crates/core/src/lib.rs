//! Domain core for the movie catalog.
//!
//! Pure logic shared by the store and the HTTP layer: identifier and
//! timestamp aliases, the error type, the entity/relation registry with its
//! delete policies, the Oscar category variant type, the person capability
//! traits and field-level validation. Nothing in here touches the database.

pub mod catalog;
pub mod error;
pub mod oscar;
pub mod person;
pub mod types;
pub mod validation;
