pub mod genre;
pub mod health;
pub mod movie;
pub mod oscar_award;
pub mod person;

use axum::Router;

use crate::state::AppState;

/// Build the catalog route tree.
///
/// Route hierarchy:
///
/// ```text
/// /genres/                                 list, create
/// /genres/{id}/                            get, partial update, delete
///
/// /oscarAwards/                            list, create
/// /oscarAwards/{id}/                       get, partial update, delete
///
/// /actors/                                 list, create
/// /actors/{id}/                            get, partial update, delete
///
/// /directors/                              list, create
/// /directors/{id}/                         get, partial update, delete (cascades)
///
/// /movies/                                 list, create
/// /movies/{id}/                            get, partial update, delete
/// /movies/{id}/actors/{actor_id}/          link (PUT), unlink (DELETE)
/// /movies/{id}/genres/{genre_id}/          link (PUT), unlink (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(genre::router())
        .merge(oscar_award::router())
        .merge(person::router())
        .merge(movie::router())
}
