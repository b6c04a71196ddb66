//! Route definitions for `/admin/domain`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::domain;
use crate::state::AppState;

/// Routes merged into `/admin`.
///
/// ```text
/// PUT /domain          -> set_domain (claim or release)
/// GET /domain/status   -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/domain", put(domain::set_domain))
        .route("/domain/status", get(domain::status))
}
