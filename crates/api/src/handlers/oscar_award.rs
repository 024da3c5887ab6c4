//! Handlers for the `/oscarAwards/` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use moviedb_core::types::DbId;
use moviedb_db::models::oscar_award::{CreateOscarAward, UpdateOscarAward};
use moviedb_db::repositories::OscarAwardRepo;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::views::OscarAwardView;

/// POST /oscarAwards/
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateOscarAward>,
) -> AppResult<(StatusCode, Json<OscarAwardView>)> {
    let award = OscarAwardRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(award.into())))
}

/// GET /oscarAwards/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<OscarAwardView>>> {
    let awards = OscarAwardRepo::list(&state.pool).await?;
    Ok(Json(awards.into_iter().map(Into::into).collect()))
}

/// GET /oscarAwards/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<OscarAwardView>> {
    let award = OscarAwardRepo::get(&state.pool, id).await?;
    Ok(Json(award.into()))
}

/// PATCH /oscarAwards/{id}/
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateOscarAward>,
) -> AppResult<Json<OscarAwardView>> {
    let award = OscarAwardRepo::update(&state.pool, id, &input).await?;
    Ok(Json(award.into()))
}

/// DELETE /oscarAwards/{id}/
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    OscarAwardRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
