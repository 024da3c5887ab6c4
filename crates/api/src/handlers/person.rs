//! Handlers shared by the `/actors/` and `/directors/` resources.
//!
//! The route tree attaches the [`PersonKind`] as a request extension, so one
//! set of handlers serves both tables.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use moviedb_core::person::PersonKind;
use moviedb_core::types::DbId;
use moviedb_db::models::person::{CreatePerson, Person, UpdatePerson};
use moviedb_db::repositories::PersonRepo;
use moviedb_db::DbPool;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::views::PersonView;

async fn view(pool: &DbPool, kind: PersonKind, person: Person) -> AppResult<PersonView> {
    let movie_ids = PersonRepo::movie_ids(pool, kind, person.id).await?;
    Ok(PersonView::new(kind, person, &movie_ids))
}

/// POST /actors/, /directors/
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<PersonKind>,
    ApiJson(input): ApiJson<CreatePerson>,
) -> AppResult<(StatusCode, Json<PersonView>)> {
    let person = PersonRepo::create(&state.pool, kind, &input).await?;
    Ok((StatusCode::CREATED, Json(view(&state.pool, kind, person).await?)))
}

/// GET /actors/, /directors/
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<PersonKind>,
) -> AppResult<Json<Vec<PersonView>>> {
    let people = PersonRepo::list(&state.pool, kind).await?;
    let mut views = Vec::with_capacity(people.len());
    for person in people {
        views.push(view(&state.pool, kind, person).await?);
    }
    Ok(Json(views))
}

/// GET /actors/{id}/, /directors/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<PersonKind>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<PersonView>> {
    let person = PersonRepo::get(&state.pool, kind, id).await?;
    Ok(Json(view(&state.pool, kind, person).await?))
}

/// PATCH /actors/{id}/, /directors/{id}/
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<PersonKind>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdatePerson>,
) -> AppResult<Json<PersonView>> {
    let person = PersonRepo::update(&state.pool, kind, id, &input).await?;
    Ok(Json(view(&state.pool, kind, person).await?))
}

/// DELETE /actors/{id}/, /directors/{id}/
///
/// Deleting a director also deletes the movies it directs.
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<PersonKind>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    PersonRepo::delete(&state.pool, kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
