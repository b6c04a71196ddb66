//! Route definitions for `/admin/settings`.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/admin/settings`.
///
/// ```text
/// GET    /        -> get_all (sensitive keys included)
/// GET    /{key}   -> get_by_key
/// PUT    /{key}   -> upsert
/// DELETE /{key}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::get_all))
        .route(
            "/{key}",
            get(settings::get_by_key)
                .put(settings::upsert)
                .delete(settings::delete),
        )
}
