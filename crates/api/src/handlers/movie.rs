//! Handlers for the `/movies/` resource and its actor/genre links.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use moviedb_core::types::DbId;
use moviedb_db::models::movie::{CreateMovie, UpdateMovie};
use moviedb_db::repositories::MovieRepo;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::views::MovieView;

/// POST /movies/
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateMovie>,
) -> AppResult<(StatusCode, Json<MovieView>)> {
    let movie = MovieRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(movie.into())))
}

/// GET /movies/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MovieView>>> {
    let movies = MovieRepo::list(&state.pool).await?;
    Ok(Json(movies.into_iter().map(Into::into).collect()))
}

/// GET /movies/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<MovieView>> {
    let movie = MovieRepo::get(&state.pool, id).await?;
    Ok(Json(movie.into()))
}

/// PATCH /movies/{id}/
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateMovie>,
) -> AppResult<Json<MovieView>> {
    let movie = MovieRepo::update(&state.pool, id, &input).await?;
    Ok(Json(movie.into()))
}

/// DELETE /movies/{id}/
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    MovieRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /movies/{id}/actors/{actor_id}/
pub async fn add_actor(
    State(state): State<AppState>,
    ApiPath((id, actor_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    MovieRepo::add_actor(&state.pool, id, actor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /movies/{id}/actors/{actor_id}/
///
/// Succeeds whether or not the link existed.
pub async fn remove_actor(
    State(state): State<AppState>,
    ApiPath((id, actor_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    MovieRepo::remove_actor(&state.pool, id, actor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /movies/{id}/genres/{genre_id}/
pub async fn add_genre(
    State(state): State<AppState>,
    ApiPath((id, genre_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    MovieRepo::add_genre(&state.pool, id, genre_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /movies/{id}/genres/{genre_id}/
pub async fn remove_genre(
    State(state): State<AppState>,
    ApiPath((id, genre_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    MovieRepo::remove_genre(&state.pool, id, genre_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
