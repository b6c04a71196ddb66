//! Route definitions for the public portfolio surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Public routes mounted at the API root.
///
/// ```text
/// GET /resolve-domain                -> resolve_domain
/// GET /u/{username}/projects         -> list_projects
/// GET /u/{username}/projects/{id}    -> get_project
/// GET /u/{username}/designs          -> list_designs
/// GET /u/{username}/designs/{id}     -> get_design
/// GET /u/{username}/settings         -> get_settings
/// GET /u/{username}/settings/{key}   -> get_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resolve-domain", get(public::resolve_domain))
        .route("/u/{username}/projects", get(public::list_projects))
        .route("/u/{username}/projects/{id}", get(public::get_project))
        .route("/u/{username}/designs", get(public::list_designs))
        .route("/u/{username}/designs/{id}", get(public::get_design))
        .route("/u/{username}/settings", get(public::get_settings))
        .route("/u/{username}/settings/{key}", get(public::get_setting))
}
