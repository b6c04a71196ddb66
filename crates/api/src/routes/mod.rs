pub mod auth;
pub mod designs;
pub mod domain;
pub mod health;
pub mod invites;
pub mod projects;
pub mod public;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/me                               current tenant (requires auth)
///
/// /resolve-domain?domain=...             custom domain -> username (public)
/// /u/{username}/projects                 public project list
/// /u/{username}/projects/{id}            public project detail
/// /u/{username}/designs                  public design list
/// /u/{username}/designs/{id}             public design detail
/// /u/{username}/settings                 public settings (sensitive keys stripped)
/// /u/{username}/settings/{key}           public single setting
///
/// /admin/projects                        list, create (requires auth)
/// /admin/projects/{id}                   get, update, delete
/// /admin/designs                         list, create
/// /admin/designs/{id}                    get, update, delete
/// /admin/settings                        all settings (sensitive included)
/// /admin/settings/{key}                  get, upsert, delete
/// /admin/invites                         list, create
/// /admin/invites/{id}                    revoke
/// /admin/domain                          claim/release custom domain (PUT)
/// /admin/domain/status                   live verification status
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .nest("/projects", projects::router())
        .nest("/designs", designs::router())
        .nest("/settings", settings::router())
        .nest("/invites", invites::router())
        .merge(domain::router());

    Router::new()
        .nest("/auth", auth::router())
        .merge(public::router())
        .nest("/admin", admin)
}
