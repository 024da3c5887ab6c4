//! Routes for `/actors/` and `/directors/`.
//!
//! Both trees share the handlers in [`crate::handlers::person`]; each one
//! carries its [`PersonKind`] as a request extension.

use axum::routing::get;
use axum::{Extension, Router};
use moviedb_core::person::PersonKind;

use crate::handlers::person;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(people(PersonKind::Actor))
        .merge(people(PersonKind::Director))
}

/// ```text
/// GET    /{kind}s/          -> list
/// POST   /{kind}s/          -> create
/// GET    /{kind}s/{id}/     -> get_by_id
/// PATCH  /{kind}s/{id}/     -> update
/// DELETE /{kind}s/{id}/     -> delete
/// ```
fn people(kind: PersonKind) -> Router<AppState> {
    let collection = kind.entity().collection_path();
    let item = format!("{collection}{{id}}/");

    Router::new()
        .route(collection, get(person::list).post(person::create))
        .route(
            &item,
            get(person::get_by_id)
                .patch(person::update)
                .delete(person::delete),
        )
        .layer(Extension(kind))
}
