//! Route definitions for `/admin/invites`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::invites;
use crate::state::AppState;

/// Routes mounted at `/admin/invites`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// DELETE /{id}   -> revoke
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invites::list).post(invites::create))
        .route("/{id}", delete(invites::revoke))
}
