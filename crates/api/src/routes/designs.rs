//! Route definitions for `/admin/designs`.

use axum::routing::get;
use axum::Router;

use crate::handlers::designs;
use crate::state::AppState;

/// Routes mounted at `/admin/designs`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(designs::list).post(designs::create))
        .route(
            "/{id}",
            get(designs::get_by_id)
                .put(designs::update)
                .delete(designs::delete),
        )
}
