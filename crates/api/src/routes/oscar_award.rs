use axum::routing::get;
use axum::Router;

use crate::handlers::oscar_award;
use crate::state::AppState;

/// Routes for `/oscarAwards/`.
///
/// ```text
/// GET    /oscarAwards/          -> list
/// POST   /oscarAwards/          -> create
/// GET    /oscarAwards/{id}/     -> get_by_id
/// PATCH  /oscarAwards/{id}/     -> update
/// DELETE /oscarAwards/{id}/     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/oscarAwards/",
            get(oscar_award::list).post(oscar_award::create),
        )
        .route(
            "/oscarAwards/{id}/",
            get(oscar_award::get_by_id)
                .patch(oscar_award::update)
                .delete(oscar_award::delete),
        )
}
