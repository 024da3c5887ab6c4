use axum::routing::{get, put};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes for `/movies/`.
///
/// ```text
/// GET    /movies/                          -> list
/// POST   /movies/                          -> create
/// GET    /movies/{id}/                     -> get_by_id
/// PATCH  /movies/{id}/                     -> update
/// DELETE /movies/{id}/                     -> delete
/// PUT    /movies/{id}/actors/{actor_id}/   -> add_actor
/// DELETE /movies/{id}/actors/{actor_id}/   -> remove_actor
/// PUT    /movies/{id}/genres/{genre_id}/   -> add_genre
/// DELETE /movies/{id}/genres/{genre_id}/   -> remove_genre
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies/", get(movie::list).post(movie::create))
        .route(
            "/movies/{id}/",
            get(movie::get_by_id)
                .patch(movie::update)
                .delete(movie::delete),
        )
        .route(
            "/movies/{id}/actors/{actor_id}/",
            put(movie::add_actor).delete(movie::remove_actor),
        )
        .route(
            "/movies/{id}/genres/{genre_id}/",
            put(movie::add_genre).delete(movie::remove_genre),
        )
}
