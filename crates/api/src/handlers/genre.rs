//! Handlers for the `/genres/` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use moviedb_core::types::DbId;
use moviedb_db::models::genre::{CreateGenre, Genre, UpdateGenre};
use moviedb_db::repositories::GenreRepo;
use moviedb_db::DbPool;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::views::GenreView;

async fn view(pool: &DbPool, genre: Genre) -> AppResult<GenreView> {
    let movie_ids = GenreRepo::movie_ids(pool, genre.id).await?;
    Ok(GenreView::new(genre, &movie_ids))
}

/// POST /genres/
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<GenreView>)> {
    let genre = GenreRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(view(&state.pool, genre).await?)))
}

/// GET /genres/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<GenreView>>> {
    let genres = GenreRepo::list(&state.pool).await?;
    let mut views = Vec::with_capacity(genres.len());
    for genre in genres {
        views.push(view(&state.pool, genre).await?);
    }
    Ok(Json(views))
}

/// GET /genres/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<GenreView>> {
    let genre = GenreRepo::get(&state.pool, id).await?;
    Ok(Json(view(&state.pool, genre).await?))
}

/// PATCH /genres/{id}/
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateGenre>,
) -> AppResult<Json<GenreView>> {
    let genre = GenreRepo::update(&state.pool, id, &input).await?;
    Ok(Json(view(&state.pool, genre).await?))
}

/// DELETE /genres/{id}/
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    GenreRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
